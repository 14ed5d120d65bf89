use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::command::ConverterCommand;
use crate::error::{Error, FontResult};
use crate::manifest::FontManifest;
use crate::patch::{PatchOutcome, declares_font, patch_file};

/// Runs a converter invocation to completion
pub trait Converter {
    fn convert(&self, command: &ConverterCommand) -> FontResult<()>;
}

/// Spawns the real converter process and blocks until it exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessConverter;

impl Converter for ProcessConverter {
    fn convert(&self, command: &ConverterCommand) -> FontResult<()> {
        let program = command.program();
        let resolved = resolve_program(program)?;

        let status = command
            .to_process_with(&resolved)
            .status()
            .map_err(|source| Error::ToolLaunch {
                program: program.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(Error::ToolFailed {
                program: program.to_string(),
                code: status.code(),
            });
        }
        Ok(())
    }
}

/// Locate `program` on PATH, honouring PATHEXT on Windows (`npx` -> `npx.cmd`)
fn resolve_program(program: &str) -> FontResult<PathBuf> {
    which::which(program).map_err(|_| Error::ToolNotFound {
        program: program.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub command_line: String,
    pub output: PathBuf,
    pub patch: PatchOutcome,
    /// Generated source defines the expected `lv_font_t` symbol
    pub font_declared: bool,
}

/// Generate the merged font and patch it for LVGL's simple include mode.
///
/// A failed conversion leaves whatever the converter wrote in place.
pub fn build(manifest: &FontManifest, converter: &impl Converter) -> FontResult<BuildReport> {
    manifest.validate()?;

    if let Some(parent) = manifest.output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let command = ConverterCommand::from_manifest(manifest);
    let command_line = command.command_line();
    debug!("Running: {command_line}");

    converter.convert(&command)?;

    let patch = patch_file(&manifest.output)?;
    let font_declared = check_font_symbol(manifest)?;

    Ok(BuildReport {
        command_line,
        output: manifest.output.clone(),
        patch,
        font_declared,
    })
}

fn check_font_symbol(manifest: &FontManifest) -> FontResult<bool> {
    let Some(symbol) = manifest.font_symbol() else {
        return Ok(false);
    };
    let content =
        std::fs::read_to_string(&manifest.output).map_err(|e| Error::io(&manifest.output, e))?;

    let declared = declares_font(&content, symbol);
    if !declared {
        warn!(
            "{} does not define lv_font_t {symbol}; LV_FONT_DECLARE({symbol}) will not link",
            manifest.output.display()
        );
    }
    Ok(declared)
}

/// Font sources that do not exist on disk
pub fn check_inputs(manifest: &FontManifest) -> Vec<&Path> {
    manifest
        .fonts
        .iter()
        .map(|f| f.path.as_path())
        .filter(|p| !p.exists())
        .collect()
}

/// Remove the generated output. Returns whether a file was removed.
pub fn clean_output(manifest: &FontManifest) -> FontResult<bool> {
    if !manifest.output.exists() {
        return Ok(false);
    }
    std::fs::remove_file(&manifest.output).map_err(|e| Error::io(&manifest.output, e))?;
    Ok(true)
}
