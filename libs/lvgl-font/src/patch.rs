use std::path::Path;

use log::info;

use crate::error::{Error, FontResult};

/// Selects LVGL's `#include "lvgl.h"` form in generated font sources
pub const SIMPLE_INCLUDE_DEFINE: &str = "#define LV_LVGL_H_INCLUDE_SIMPLE\n";

/// Guard emitted by `lv_font_conv` ahead of its include block
pub const SIMPLE_INCLUDE_GUARD: &str = "#ifdef LV_LVGL_H_INCLUDE_SIMPLE";

/// Result of patching text in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchResult {
    Inserted(String),
    AlreadyPresent,
    GuardMissing,
}

/// What happened to a file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Define added above the first guard and file rewritten
    Inserted,
    /// Define already present, file untouched
    AlreadyPresent,
    /// No guard in the file, file untouched
    GuardMissing,
}

impl From<&PatchResult> for PatchOutcome {
    fn from(result: &PatchResult) -> Self {
        match result {
            PatchResult::Inserted(_) => Self::Inserted,
            PatchResult::AlreadyPresent => Self::AlreadyPresent,
            PatchResult::GuardMissing => Self::GuardMissing,
        }
    }
}

/// Insert [`SIMPLE_INCLUDE_DEFINE`] directly above the first
/// [`SIMPLE_INCLUDE_GUARD`].
///
/// Presence is an exact substring match on the define (newline included), so
/// running this on its own output is a no-op. Later guards are left alone.
pub fn patch_source(content: &str) -> PatchResult {
    if content.contains(SIMPLE_INCLUDE_DEFINE) {
        return PatchResult::AlreadyPresent;
    }

    let Some(at) = content.find(SIMPLE_INCLUDE_GUARD) else {
        return PatchResult::GuardMissing;
    };

    let mut patched = String::with_capacity(content.len() + SIMPLE_INCLUDE_DEFINE.len());
    patched.push_str(&content[..at]);
    patched.push_str(SIMPLE_INCLUDE_DEFINE);
    patched.push_str(&content[at..]);
    PatchResult::Inserted(patched)
}

/// Patch a generated font source in place. Only writes when the define was inserted.
pub fn patch_file(path: &Path) -> FontResult<PatchOutcome> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    let result = patch_source(&content);
    let outcome = PatchOutcome::from(&result);

    match result {
        PatchResult::Inserted(patched) => {
            std::fs::write(path, patched).map_err(|e| Error::io(path, e))?;
            info!("Added LV_LVGL_H_INCLUDE_SIMPLE to {}", path.display());
        }
        PatchResult::AlreadyPresent => {
            info!("LV_LVGL_H_INCLUDE_SIMPLE already present in {}", path.display());
        }
        PatchResult::GuardMissing => {
            info!("No include guard in {}, left unchanged", path.display());
        }
    }

    Ok(outcome)
}

/// Whether a generated source defines `lv_font_t <symbol>`
pub fn declares_font(content: &str, symbol: &str) -> bool {
    content.contains(&format!("lv_font_t {symbol} "))
        || content.contains(&format!("lv_font_t {symbol}="))
}
