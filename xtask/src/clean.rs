use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use lvgl_font::clean_output;

use crate::fonts::load_manifest;

/// Remove the generated font source
pub fn clean(manifest_path: Option<&Path>) -> Result<()> {
    println!("{}", "Cleaning generated font...".cyan());

    let manifest = load_manifest(manifest_path)?;
    if clean_output(&manifest)? {
        println!("    {} {} removed", "✓".green(), manifest.output.display());
    } else {
        println!(
            "  {} {} not found, skipping",
            "⚠".yellow(),
            manifest.output.display()
        );
    }

    println!();
    println!("{}", "✓ Clean complete".green());
    println!();
    println!("Tip: Use {} to regenerate it", "cargo xtask fonts".cyan());

    Ok(())
}
