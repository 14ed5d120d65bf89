use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::env;
use std::path::PathBuf;

mod clean;
mod fonts;
mod utils;

use clean::clean as do_clean;
use fonts::{FontsOptions, cmd_fonts, cmd_patch, cmd_validate};
use utils::{absolutize, current_dir, find_project_root, init_logging};

/// Font asset build system - generates the merged LVGL UI font
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "LVGL font build automation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug logging (converter command line, patch decisions)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge body and icon fonts with lv_font_conv, then patch the output
    Fonts {
        /// JSON manifest overriding the built-in font selection
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Print the converter command without running it
        #[arg(long)]
        dry_run: bool,

        /// Report failures but exit successfully
        #[arg(long)]
        lenient: bool,
    },

    /// Add #define LV_LVGL_H_INCLUDE_SIMPLE to an already generated font
    Patch {
        /// Generated font source (.c)
        file: PathBuf,
    },

    /// Check that the converter and font sources are available
    Validate {
        /// JSON manifest overriding the built-in font selection
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Remove the generated font source
    Clean {
        /// JSON manifest overriding the built-in font selection
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },
}

fn main() {
    if let Err(e) = try_main() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // User-supplied paths are relative to where xtask was invoked
    let invocation_dir = current_dir()?;
    let abs = |p: Option<PathBuf>| p.map(|p| absolutize(&invocation_dir, &p));

    // Ensure we're in the project root
    let project_root = find_project_root(&invocation_dir)?;
    env::set_current_dir(&project_root).context("Failed to change to project root directory")?;

    match cli.command {
        Commands::Fonts {
            manifest,
            dry_run,
            lenient,
        } => {
            let manifest = abs(manifest);
            cmd_fonts(&FontsOptions {
                manifest: manifest.as_deref(),
                dry_run,
                lenient,
            })
        }
        Commands::Patch { file } => cmd_patch(&absolutize(&invocation_dir, &file)),
        Commands::Validate { manifest } => cmd_validate(abs(manifest).as_deref()),
        Commands::Clean { manifest } => do_clean(abs(manifest).as_deref()),
    }
}
