use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use lvgl_font::patch::{SIMPLE_INCLUDE_DEFINE, SIMPLE_INCLUDE_GUARD};
use lvgl_font::{
    Converter, ConverterCommand, Error, FailureKind, FontManifest, FontResult, PatchOutcome, build,
    check_inputs, clean_output, patch_file,
};
use tempfile::TempDir;

/// Minimal stand-in for what `lv_font_conv --format lvgl` writes
fn generated_source(symbol: &str) -> String {
    format!(
        "#ifdef LV_LVGL_H_INCLUDE_SIMPLE\n\
         #include \"lvgl.h\"\n\
         #else\n\
         #include \"lvgl/lvgl.h\"\n\
         #endif\n\
         \n\
         const lv_font_t {symbol} = {{\n\
         \x20   .line_height = 17,\n\
         }};\n"
    )
}

/// Writes a canned font source to the `--output` path and records the command
struct FakeConverter {
    content: String,
    seen: RefCell<Vec<String>>,
}

impl FakeConverter {
    fn new(content: String) -> Self {
        Self {
            content,
            seen: RefCell::new(Vec::new()),
        }
    }
}

fn output_arg(command: &ConverterCommand) -> PathBuf {
    let args = command.args();
    let pos = args.iter().position(|a| a == "--output").unwrap();
    PathBuf::from(&args[pos + 1])
}

impl Converter for FakeConverter {
    fn convert(&self, command: &ConverterCommand) -> FontResult<()> {
        self.seen.borrow_mut().push(command.command_line());
        fs::write(output_arg(command), &self.content).unwrap();
        Ok(())
    }
}

struct FailingConverter;

impl Converter for FailingConverter {
    fn convert(&self, command: &ConverterCommand) -> FontResult<()> {
        Err(Error::ToolFailed {
            program: command.program().to_string(),
            code: Some(1),
        })
    }
}

fn manifest_in(dir: &Path) -> FontManifest {
    FontManifest::default().resolve(dir)
}

#[test]
fn test_build_generates_and_patches() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = manifest_in(temp_dir.path());
    let converter = FakeConverter::new(generated_source("HarmonyMedium"));

    let report = build(&manifest, &converter).unwrap();

    assert_eq!(report.patch, PatchOutcome::Inserted);
    assert!(report.font_declared);
    assert_eq!(report.output, temp_dir.path().join("main/HarmonyMedium.c"));

    let content = fs::read_to_string(&report.output).unwrap();
    assert!(content.starts_with(&format!("{SIMPLE_INCLUDE_DEFINE}{SIMPLE_INCLUDE_GUARD}")));
    assert_eq!(content.matches(SIMPLE_INCLUDE_DEFINE).count(), 1);
}

#[test]
fn test_build_passes_argument_groups_in_order() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = manifest_in(temp_dir.path());
    let converter = FakeConverter::new(generated_source("HarmonyMedium"));

    build(&manifest, &converter).unwrap();

    let seen = converter.seen.borrow();
    assert_eq!(seen.len(), 1);
    let line = &seen[0];

    let groups = [
        "npx lv_font_conv --font ",
        "HarmonyOS_Sans_SC_Medium.ttf --range 0x20-0x7F --symbols 列表地图编号名称序列号位置类型设备 --font ",
        "InconsolataNerdFontPropo-Regular.ttf --symbols \u{f03a}\u{f279}\u{f05a} --size 16 --format lvgl --bpp 4 --output ",
        "HarmonyMedium.c",
    ];
    let mut from = 0;
    for group in groups {
        let at = line[from..]
            .find(group)
            .unwrap_or_else(|| panic!("missing or out of order: {group}"));
        from += at + group.len();
    }
    assert_eq!(from, line.len());
}

#[test]
fn test_rebuild_does_not_duplicate_define() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = manifest_in(temp_dir.path());
    let patched = format!("{SIMPLE_INCLUDE_DEFINE}{}", generated_source("HarmonyMedium"));
    let converter = FakeConverter::new(patched.clone());

    let report = build(&manifest, &converter).unwrap();

    assert_eq!(report.patch, PatchOutcome::AlreadyPresent);
    assert_eq!(fs::read_to_string(&report.output).unwrap(), patched);
}

#[test]
fn test_build_warns_on_unexpected_symbol() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = manifest_in(temp_dir.path());
    let converter = FakeConverter::new(generated_source("SomethingElse"));

    let report = build(&manifest, &converter).unwrap();

    assert_eq!(report.patch, PatchOutcome::Inserted);
    assert!(!report.font_declared);
}

#[test]
fn test_converter_failure_is_returned() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = manifest_in(temp_dir.path());

    let err = build(&manifest, &FailingConverter).unwrap_err();

    assert_eq!(err.kind(), FailureKind::Tool);
    assert!(!manifest.output.exists());
}

#[test]
fn test_invalid_manifest_never_runs_converter() {
    let temp_dir = TempDir::new().unwrap();
    let mut manifest = manifest_in(temp_dir.path());
    manifest.params.bpp = 7;
    let converter = FakeConverter::new(generated_source("HarmonyMedium"));

    let err = build(&manifest, &converter).unwrap_err();

    assert_eq!(err.kind(), FailureKind::Config);
    assert!(converter.seen.borrow().is_empty());
}

#[test]
fn test_patch_file_twice_matches_once() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Font.c");
    fs::write(&path, generated_source("Font")).unwrap();

    assert_eq!(patch_file(&path).unwrap(), PatchOutcome::Inserted);
    let once = fs::read(&path).unwrap();

    assert_eq!(patch_file(&path).unwrap(), PatchOutcome::AlreadyPresent);
    assert_eq!(fs::read(&path).unwrap(), once);
}

#[test]
fn test_patch_file_without_guard_is_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Plain.c");
    let original = b"#include \"lvgl.h\"\r\nconst int x = 1;\r\n";
    fs::write(&path, original).unwrap();

    assert_eq!(patch_file(&path).unwrap(), PatchOutcome::GuardMissing);
    assert_eq!(fs::read(&path).unwrap(), original);
}

#[test]
fn test_patch_missing_file_is_io_failure() {
    let temp_dir = TempDir::new().unwrap();

    let err = patch_file(&temp_dir.path().join("absent.c")).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Io);
}

#[test]
fn test_check_inputs_and_clean() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = manifest_in(temp_dir.path());

    assert_eq!(check_inputs(&manifest).len(), 2);

    fs::create_dir_all(temp_dir.path().join("fonts")).unwrap();
    fs::write(&manifest.fonts[0].path, b"ttf").unwrap();
    assert_eq!(check_inputs(&manifest), vec![manifest.fonts[1].path.as_path()]);

    assert!(!clean_output(&manifest).unwrap());
    fs::create_dir_all(manifest.output.parent().unwrap()).unwrap();
    fs::write(&manifest.output, generated_source("HarmonyMedium")).unwrap();
    assert!(clean_output(&manifest).unwrap());
    assert!(!manifest.output.exists());
}

#[test]
fn test_manifest_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("fonts.json");
    fs::write(
        &path,
        r#"{
            "fonts": [
                {"path": "fonts/Body.ttf", "glyphs": [{"range": "0x30-0x39"}]}
            ],
            "bpp": 2,
            "output": "ui/Digits.c"
        }"#,
    )
    .unwrap();

    let manifest = FontManifest::load(&path).unwrap();
    manifest.validate().unwrap();
    assert_eq!(manifest.params.bpp, 2);
    assert_eq!(manifest.font_symbol(), Some("Digits"));
    assert_eq!(
        ConverterCommand::from_manifest(&manifest).command_line(),
        "npx lv_font_conv --font fonts/Body.ttf --range 0x30-0x39 \
         --size 16 --format lvgl --bpp 2 --output ui/Digits.c"
    );

    fs::write(&path, "{ not json").unwrap();
    let err = FontManifest::load(&path).unwrap_err();
    assert!(matches!(err, Error::Manifest { .. }));
}
