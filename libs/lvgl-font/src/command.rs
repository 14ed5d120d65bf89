use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::manifest::FontManifest;

/// A fully assembled converter invocation.
///
/// Argument order matters: each `--font` applies to the `--range`/`--symbols`
/// flags that follow it, so fonts are layered in manifest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterCommand {
    program: String,
    args: Vec<OsString>,
}

impl ConverterCommand {
    pub fn from_manifest(manifest: &FontManifest) -> Self {
        let (program, leading) = manifest
            .converter
            .split_first()
            .map_or(("", &[][..]), |(p, rest)| (p.as_str(), rest));

        let mut args: Vec<OsString> = leading.iter().map(OsString::from).collect();

        for font in &manifest.fonts {
            args.push("--font".into());
            args.push(font.path.clone().into_os_string());
            for glyph in &font.glyphs {
                args.extend(glyph.to_args().into_iter().map(OsString::from));
            }
        }

        let params = &manifest.params;
        args.push("--size".into());
        args.push(params.size.to_string().into());
        args.push("--format".into());
        args.push(params.format.clone().into());
        args.push("--bpp".into());
        args.push(params.bpp.to_string().into());
        args.push("--output".into());
        args.push(manifest.output.clone().into_os_string());

        Self {
            program: program.to_string(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Space-joined invocation, for display and logs
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|a| a.to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Process handle with stdio inherited, so converter output reaches the console
    pub fn to_process(&self) -> Command {
        self.to_process_with(Path::new(&self.program))
    }

    /// Same as [`Self::to_process`], but spawns `program` (e.g. the path
    /// `which` resolved, which may be `npx.cmd` on Windows)
    pub fn to_process_with(&self, program: &Path) -> Command {
        let mut cmd = Command::new(program);
        cmd.args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}
