use core::fmt;
use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, FontResult};

/// Highest valid Unicode scalar value
const MAX_CODE_POINT: u32 = 0x10_FFFF;

/// Inclusive range of code points, written `0x20-0x7F` on the converter command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodeRange {
    pub(crate) start: u32,
    pub(crate) end: u32,
}

impl CodeRange {
    pub fn new(start: u32, end: u32) -> FontResult<Self> {
        if start > end {
            return Err(Error::InvalidSelector(format!(
                "range start 0x{start:X} is above end 0x{end:X}"
            )));
        }
        if end > MAX_CODE_POINT {
            return Err(Error::InvalidSelector(format!(
                "0x{end:X} is outside the Unicode code space"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of code points covered; never zero
    pub(crate) fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }
}

fn parse_code_point(text: &str) -> FontResult<u32> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|_| Error::InvalidSelector(format!("'{text}' is not a code point")))
}

impl FromStr for CodeRange {
    type Err = Error;

    fn from_str(s: &str) -> FontResult<Self> {
        match s.split_once('-') {
            Some((start, end)) => Self::new(parse_code_point(start)?, parse_code_point(end)?),
            None => {
                let single = parse_code_point(s)?;
                Self::new(single, single)
            }
        }
    }
}

impl TryFrom<String> for CodeRange {
    type Error = Error;

    fn try_from(value: String) -> FontResult<Self> {
        value.parse()
    }
}

impl From<CodeRange> for String {
    fn from(range: CodeRange) -> Self {
        range.to_string()
    }
}

impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "0x{:X}", self.start)
        } else {
            write!(f, "0x{:X}-0x{:X}", self.start, self.end)
        }
    }
}

/// Which glyphs to take from one font.
///
/// Serialized externally tagged, e.g. `{"range": "0x20-0x7F"}` or
/// `{"symbols": "列表"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphSelector {
    Range(CodeRange),
    /// Literal characters, passed through untouched (duplicates included)
    Symbols(String),
}

impl GlyphSelector {
    pub fn range(text: &str) -> FontResult<Self> {
        Ok(Self::Range(text.parse()?))
    }

    pub fn symbols(chars: impl Into<String>) -> FontResult<Self> {
        let chars = chars.into();
        if chars.is_empty() {
            return Err(Error::InvalidSelector("empty symbol list".into()));
        }
        Ok(Self::Symbols(chars))
    }

    /// Converter flag and value for this selector
    pub fn to_args(&self) -> [String; 2] {
        match self {
            Self::Range(range) => ["--range".to_string(), range.to_string()],
            Self::Symbols(chars) => ["--symbols".to_string(), chars.clone()],
        }
    }

    /// Number of distinct code points requested
    pub fn code_point_count(&self) -> usize {
        match self {
            Self::Range(range) => range.len(),
            Self::Symbols(chars) => chars.chars().collect::<BTreeSet<_>>().len(),
        }
    }

    pub(crate) fn validate(&self) -> FontResult<()> {
        match self {
            Self::Range(_) => Ok(()),
            Self::Symbols(chars) if chars.is_empty() => {
                Err(Error::InvalidSelector("empty symbol list".into()))
            }
            Self::Symbols(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_range() {
        let range: CodeRange = "0x20-0x7F".parse().unwrap();
        assert_eq!(range.start(), 0x20);
        assert_eq!(range.end(), 0x7F);
        assert_eq!(range.len(), 96);
        assert_eq!(range.to_string(), "0x20-0x7F");
    }

    #[test]
    fn test_parse_decimal_and_single() {
        let range: CodeRange = "32-127".parse().unwrap();
        assert_eq!(range.to_string(), "0x20-0x7F");

        let single: CodeRange = "0XF03A".parse().unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single.to_string(), "0xF03A");
    }

    #[test]
    fn test_reject_bad_ranges() {
        assert!("0x7F-0x20".parse::<CodeRange>().is_err());
        assert!("0x110000".parse::<CodeRange>().is_err());
        assert!("abc".parse::<CodeRange>().is_err());
        assert!("0x20-".parse::<CodeRange>().is_err());
    }

    #[test]
    fn test_selector_args() {
        let range = GlyphSelector::range("0x20-0x7F").unwrap();
        assert_eq!(range.to_args(), ["--range", "0x20-0x7F"]);

        let symbols = GlyphSelector::symbols("列表").unwrap();
        assert_eq!(symbols.to_args(), ["--symbols", "列表"]);
    }

    #[test]
    fn test_symbols_count_distinct() {
        let symbols = GlyphSelector::symbols("编号序列号").unwrap();
        assert_eq!(symbols.code_point_count(), 4);
        assert!(GlyphSelector::symbols("").is_err());
    }

    #[test]
    fn test_selector_json_shape() {
        let json = r#"[{"range": "0x20-0x7F"}, {"symbols": "\uf03a"}]"#;
        let selectors: Vec<GlyphSelector> = serde_json::from_str(json).unwrap();
        assert_eq!(
            selectors,
            vec![
                GlyphSelector::range("0x20-0x7F").unwrap(),
                GlyphSelector::symbols("\u{f03a}").unwrap(),
            ]
        );

        assert!(serde_json::from_str::<GlyphSelector>(r#"{"range": "0x7F-0x20"}"#).is_err());
    }
}
