use std::{fmt, path::PathBuf};

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Describes an error encountered while interpreting, editing or saving a bitmap.
#[derive(Debug)]
pub enum Error {
    /// The bit-depth mode is not one of the supported encodings. Holds the rejected input.
    UnsupportedMode(String),
    /// The raster width is missing, non-numeric or not positive. Holds the rejected input.
    InvalidWidth(String),
    /// There are not enough pixels to fill a single row.
    EmptyRaster {
        /// Pixels available after trailing zero bytes were stripped
        pixels: usize,
        /// Requested raster width
        width: usize,
    },
    /// An operation needs a source file or raster but none has been opened
    FileNotSelected,
    /// Strict mode only accepts `.bin` / `.BIN` source files
    UnsupportedExtension(PathBuf),
    /// Some data is malformed in some way. The string describes how.
    Malformed(&'static str),
    /// The codec had a problem
    InternalError(&'static str),
    /// The image library failed to encode or decode a file
    Image(image::ImageError),
    /// There was an error reading or writing a file
    Io(std::io::Error),
    /// The configuration file could not be parsed
    Config(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedMode(mode) => {
                write!(f, "Unsupported mode '{mode}'. Use '1bit' or '8bit'.")
            }
            Error::InvalidWidth(width) => {
                write!(f, "Invalid width '{width}': expected a positive integer")
            }
            Error::EmptyRaster { pixels, width } => write!(
                f,
                "Not enough data for a single row: {pixels} pixel(s) at width {width}"
            ),
            Error::FileNotSelected => write!(f, "Please select a file!"),
            Error::UnsupportedExtension(path) => {
                write!(f, "Unsupported file {}: expected a .bin file", path.display())
            }
            Error::Malformed(msg) => write!(f, "Malformed data: {msg}"),
            Error::InternalError(msg) => write!(f, "Internal error: {msg}"),
            Error::Image(err) => write!(f, "Image error: {err}"),
            Error::Io(err) => write!(f, "I/O error: {err}"),
            Error::Config(err) => write!(f, "Invalid configuration: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Image(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err)
    }
}
