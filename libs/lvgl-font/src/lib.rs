//! Builds a merged LVGL bitmap font with `lv_font_conv` and patches the
//! generated C source so it compiles against `lvgl.h` without edits.
//!
//! The command and patch steps are pure; file and process I/O sit in
//! [`pipeline`] behind the [`Converter`] trait.

pub mod command;
pub mod error;
pub mod manifest;
pub mod patch;
pub mod pipeline;
pub mod selector;

pub use command::ConverterCommand;
pub use error::{Error, FailureKind, FontResult};
pub use manifest::{FontManifest, FontSource, RenderParams};
pub use patch::{PatchOutcome, PatchResult, patch_file, patch_source};
pub use pipeline::{BuildReport, Converter, ProcessConverter, build, check_inputs, clean_output};
pub use selector::{CodeRange, GlyphSelector};
