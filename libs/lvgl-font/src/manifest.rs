// Font manifest: which fonts to merge, which glyphs to take from each, and
// how the converter should render them.
//
// The defaults reproduce the board's UI font (HarmonyOS Sans body glyphs plus
// three Nerd Font icons, 16 px, 4 bpp). A JSON manifest can override any field.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, FontResult};
use crate::selector::{CodeRange, GlyphSelector};

pub const DEFAULT_BODY_FONT: &str = "fonts/HarmonyOS_Sans_SC_Medium.ttf";
pub const DEFAULT_ICON_FONT: &str = "fonts/InconsolataNerdFontPropo-Regular.ttf";
pub const DEFAULT_OUTPUT: &str = "main/HarmonyMedium.c";

/// Printable ASCII block
pub const ASCII_RANGE: (u32, u32) = (0x20, 0x7F);

/// UI labels that need CJK glyphs
pub const UI_CHINESE_CHARS: &str = "列表地图编号名称序列号位置类型设备";

/// Nerd Font icons: list, map, info-circle
pub const NERD_FONT_ICONS: &str = "\u{f03a}\u{f279}\u{f05a}";

/// Bit depths accepted by `lv_font_conv --bpp`
const SUPPORTED_BPP: [u8; 5] = [1, 2, 3, 4, 8];

/// One input font and the glyphs to pull from it, in converter order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSource {
    pub path: PathBuf,
    pub glyphs: Vec<GlyphSelector>,
}

impl FontSource {
    pub fn new(path: impl Into<PathBuf>, glyphs: Vec<GlyphSelector>) -> Self {
        Self {
            path: path.into(),
            glyphs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderParams {
    /// Pixel size
    pub size: u32,
    /// Converter output format name
    pub format: String,
    /// Bits per pixel
    pub bpp: u8,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            size: 16,
            format: "lvgl".to_string(),
            bpp: 4,
        }
    }
}

impl RenderParams {
    pub fn validate(&self) -> FontResult<()> {
        if self.size == 0 {
            return Err(Error::InvalidParams("size must be greater than 0".into()));
        }
        if self.format.trim().is_empty() {
            return Err(Error::InvalidParams("format must not be empty".into()));
        }
        if !SUPPORTED_BPP.contains(&self.bpp) {
            return Err(Error::InvalidParams(format!(
                "bpp {} not supported (expected one of {SUPPORTED_BPP:?})",
                self.bpp
            )));
        }
        Ok(())
    }
}

/// Full description of one merged font build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontManifest {
    /// Converter program followed by its leading arguments
    pub converter: Vec<String>,
    pub fonts: Vec<FontSource>,
    #[serde(flatten)]
    pub params: RenderParams,
    pub output: PathBuf,
}

impl Default for FontManifest {
    fn default() -> Self {
        let (start, end) = ASCII_RANGE;
        Self {
            converter: vec!["npx".to_string(), "lv_font_conv".to_string()],
            fonts: vec![
                FontSource::new(
                    DEFAULT_BODY_FONT,
                    vec![
                        GlyphSelector::Range(CodeRange { start, end }),
                        GlyphSelector::Symbols(UI_CHINESE_CHARS.to_string()),
                    ],
                ),
                FontSource::new(
                    DEFAULT_ICON_FONT,
                    vec![GlyphSelector::Symbols(NERD_FONT_ICONS.to_string())],
                ),
            ],
            params: RenderParams::default(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl FontManifest {
    /// Load a manifest from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> FontResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        serde_json::from_str(&content).map_err(|source| Error::Manifest {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, otherwise use the built-in manifest
    pub fn load_or_default(path: Option<&Path>) -> FontResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> FontResult<()> {
        self.params.validate()?;

        if self.converter.is_empty() {
            return Err(Error::InvalidParams("converter command is empty".into()));
        }
        if self.fonts.is_empty() {
            return Err(Error::InvalidParams("no fonts to merge".into()));
        }
        for font in &self.fonts {
            if font.glyphs.is_empty() {
                return Err(Error::InvalidSelector(format!(
                    "{} has no glyph selectors",
                    font.path.display()
                )));
            }
            for glyph in &font.glyphs {
                glyph.validate()?;
            }
        }
        if self.output.file_stem().is_none() {
            return Err(Error::InvalidParams(format!(
                "output path {} has no file name",
                self.output.display()
            )));
        }
        Ok(())
    }

    /// Anchor relative font and output paths at `root`
    #[must_use]
    pub fn resolve(mut self, root: &Path) -> Self {
        for font in &mut self.fonts {
            font.path = root.join(&font.path);
        }
        self.output = root.join(&self.output);
        self
    }

    /// C symbol of the generated `lv_font_t`, taken from the output file stem
    pub fn font_symbol(&self) -> Option<&str> {
        self.output.file_stem().and_then(|s| s.to_str())
    }

    /// Total distinct code points requested across all fonts
    pub fn requested_glyphs(&self) -> usize {
        self.fonts
            .iter()
            .flat_map(|f| &f.glyphs)
            .map(GlyphSelector::code_point_count)
            .sum()
    }
}
