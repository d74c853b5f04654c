use std::{fmt, str::FromStr};

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How many bits of the source stream make up one pixel.
///
/// The discriminant is the number of bits per pixel.
#[derive(PartialEq, Eq, FromPrimitive, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum BitDepth {
    /// Every byte expands to 8 black or white pixels, most significant bit first
    #[default]
    #[serde(rename = "1bit")]
    OneBit = 1,
    /// Every byte is one grayscale pixel
    #[serde(rename = "8bit")]
    EightBit = 8,
}

impl BitDepth {
    /// Looks up a mode from its number of bits per pixel.
    pub fn from_bits(bits: u8) -> Result<Self> {
        FromPrimitive::from_u8(bits).ok_or_else(|| Error::UnsupportedMode(format!("{bits} bits")))
    }

    /// Number of bits per pixel
    pub fn bits(self) -> u8 {
        self as u8
    }

    /// Short name used on the command line and in configuration files
    pub fn name(self) -> &'static str {
        match self {
            BitDepth::OneBit => "1bit",
            BitDepth::EightBit => "8bit",
        }
    }
}

impl FromStr for BitDepth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let unsupported = || Error::UnsupportedMode(s.to_string());
        match s.trim().to_ascii_lowercase().as_str() {
            "onebit" => Ok(BitDepth::OneBit),
            "eightbit" => Ok(BitDepth::EightBit),
            other => {
                let bits = other.strip_suffix("bit").unwrap_or(other);
                let bits = bits.parse::<u8>().map_err(|_| unsupported())?;
                Self::from_bits(bits).map_err(|_| unsupported())
            }
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[test]
fn parse_names() {
    assert_eq!("1bit".parse::<BitDepth>().unwrap(), BitDepth::OneBit);
    assert_eq!(" 8BIT ".parse::<BitDepth>().unwrap(), BitDepth::EightBit);
    assert_eq!("8".parse::<BitDepth>().unwrap(), BitDepth::EightBit);
    assert!(matches!(
        "4bit".parse::<BitDepth>(),
        Err(Error::UnsupportedMode(mode)) if mode == "4bit"
    ));
    assert!("bit".parse::<BitDepth>().is_err());
    assert!("".parse::<BitDepth>().is_err());
}

#[test]
fn from_bit_count() {
    assert_eq!(BitDepth::from_bits(1).unwrap(), BitDepth::OneBit);
    assert_eq!(BitDepth::from_bits(8).unwrap(), BitDepth::EightBit);
    assert!(matches!(
        BitDepth::from_bits(4),
        Err(Error::UnsupportedMode(_))
    ));
    assert_eq!(BitDepth::EightBit.bits(), 8);
}

#[test]
fn names_round_trip_through_display() {
    for mode in [BitDepth::OneBit, BitDepth::EightBit] {
        assert_eq!(mode.to_string().parse::<BitDepth>().unwrap(), mode);
    }
}
