use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    mode::BitDepth,
};

/// Options consumed by the codec and the pixel inspector.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Raster width in pixels
    pub width: usize,
    /// Bit depth of the source stream
    pub mode: BitDepth,
    /// Number of columns in the pixel table
    pub columns: usize,
    /// Only accept `.bin` / `.BIN` source files
    pub strict_extension: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: 128,
            mode: BitDepth::OneBit,
            columns: 16,
            strict_extension: false,
        }
    }
}

impl Options {
    /// Loads options from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Parses options from a JSON document.
    pub fn from_json(data: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(data)?;
        if options.width == 0 {
            return Err(Error::InvalidWidth(options.width.to_string()));
        }
        Ok(options)
    }
}

/// Parses a width typed by the user.
pub fn parse_width(text: &str) -> Result<usize> {
    match text.trim().parse::<usize>() {
        Ok(width) if width > 0 => Ok(width),
        _ => Err(Error::InvalidWidth(text.to_string())),
    }
}

#[test]
fn defaults() {
    let options = Options::default();
    assert_eq!(options.width, 128);
    assert_eq!(options.mode, BitDepth::OneBit);
    assert!(!options.strict_extension);
}

#[test]
fn json_fields_override_defaults() {
    let options = Options::from_json(r#"{ "width": 64, "mode": "8bit" }"#).unwrap();
    assert_eq!(options.width, 64);
    assert_eq!(options.mode, BitDepth::EightBit);
    assert_eq!(options.columns, 16);

    assert_eq!(Options::from_json("{}").unwrap(), Options::default());
}

#[test]
fn json_rejects_bad_values() {
    assert!(matches!(
        Options::from_json(r#"{ "mode": "4bit" }"#),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        Options::from_json(r#"{ "width": 0 }"#),
        Err(Error::InvalidWidth(_))
    ));
}

#[test]
fn width_text() {
    assert_eq!(parse_width("128").unwrap(), 128);
    assert_eq!(parse_width(" 7 ").unwrap(), 7);
    for bad in ["", "0", "-4", "abc", "12.5"] {
        assert!(
            matches!(parse_width(bad), Err(Error::InvalidWidth(_))),
            "{bad:?} should be rejected"
        );
    }
}
