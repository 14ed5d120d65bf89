use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use lvgl_font::{
    ConverterCommand, FontManifest, PatchOutcome, ProcessConverter, build, check_inputs,
    patch_file,
};

use crate::utils::{check_command, current_dir};

const CONVERTER_HINT: &str = "Install Node.js, then: npm install -g lv_font_conv";

/// Options for `cargo xtask fonts`
pub struct FontsOptions<'a> {
    pub manifest: Option<&'a Path>,
    pub dry_run: bool,
    pub lenient: bool,
}

/// Load the manifest. Relative paths in a manifest file resolve against the
/// file's directory; the built-in manifest resolves against the project root.
pub fn load_manifest(path: Option<&Path>) -> Result<FontManifest> {
    match path {
        Some(path) => {
            let manifest = FontManifest::load(path)?;
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            Ok(manifest.resolve(base))
        }
        None => Ok(FontManifest::default().resolve(&current_dir()?)),
    }
}

/// Generate the merged LVGL font and patch it
pub fn cmd_fonts(opts: &FontsOptions<'_>) -> Result<()> {
    if opts.lenient {
        if let Err(e) = run_fonts(opts) {
            eprintln!("{} Font merge failed: {:#}", "✗".red(), e);
        }
        return Ok(());
    }
    run_fonts(opts)
}

fn run_fonts(opts: &FontsOptions<'_>) -> Result<()> {
    let manifest = load_manifest(opts.manifest)?;
    manifest.validate()?;

    println!(
        "{}",
        format!(
            "Merging {} font(s) into {} ({} glyphs requested)...",
            manifest.fonts.len(),
            manifest.output.display(),
            manifest.requested_glyphs()
        )
        .cyan()
    );

    if opts.dry_run {
        let command = ConverterCommand::from_manifest(&manifest);
        println!("  Would run: {}", command.command_line());
        return Ok(());
    }

    let report = build(&manifest, &ProcessConverter).context("Font merge failed")?;
    println!("  {} Font merged", "✓".green());

    match report.patch {
        PatchOutcome::Inserted => {
            println!("  {} Added #define LV_LVGL_H_INCLUDE_SIMPLE", "✓".green());
        }
        PatchOutcome::AlreadyPresent => {
            println!("  #define LV_LVGL_H_INCLUDE_SIMPLE already present");
        }
        PatchOutcome::GuardMissing => println!(
            "  {} No #ifdef LV_LVGL_H_INCLUDE_SIMPLE found, file left as generated",
            "⚠".yellow()
        ),
    }

    if let Ok(metadata) = std::fs::metadata(&report.output) {
        let size_kb = metadata.len() / 1024;
        println!("  Output: {} ({} KB)", report.output.display(), size_kb);
    }

    if let Some(symbol) = manifest.font_symbol() {
        if report.font_declared {
            println!(
                "  Use with: {}",
                format!("LV_FONT_DECLARE({symbol});").cyan()
            );
        } else {
            println!(
                "  {} lv_font_t {} not found in output",
                "⚠".yellow(),
                symbol
            );
        }
    }

    println!("{}", "✓ Font build complete".green());
    Ok(())
}

/// Apply only the include patch to an existing generated file
pub fn cmd_patch(file: &Path) -> Result<()> {
    println!("{}", format!("Patching {}...", file.display()).cyan());

    match patch_file(file)? {
        PatchOutcome::Inserted => {
            println!("  {} Added #define LV_LVGL_H_INCLUDE_SIMPLE", "✓".green());
        }
        PatchOutcome::AlreadyPresent => {
            println!("  #define LV_LVGL_H_INCLUDE_SIMPLE already present");
        }
        PatchOutcome::GuardMissing => {
            println!("  {} Include guard not found, nothing to do", "⚠".yellow());
        }
    }
    Ok(())
}

/// Check the converter and font sources are available
pub fn cmd_validate(manifest_path: Option<&Path>) -> Result<()> {
    println!("{}", "Validating font build environment...".cyan().bold());

    let manifest = load_manifest(manifest_path)?;
    manifest.validate()?;
    println!("  {} Manifest valid", "✓".green());

    println!("  Checking converter...");
    let program = manifest.converter.first().map_or("", String::as_str);
    match check_command(program, CONVERTER_HINT) {
        Ok(()) => println!("    {} {}", "✓".green(), program),
        Err(e) => println!("    {} {}", "✗".red(), e),
    }

    println!("  Checking font sources...");
    let missing = check_inputs(&manifest);
    for font in &manifest.fonts {
        if missing.contains(&font.path.as_path()) {
            println!("    {} {} (missing)", "✗".red(), font.path.display());
        } else {
            println!("    {} {}", "✓".green(), font.path.display());
        }
    }

    println!("\n{}", "Environment validation complete".green().bold());
    Ok(())
}
