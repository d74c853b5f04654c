#![warn(missing_docs)]

//! Interprets arbitrary binary files as 1-bit or 8-bit grayscale bitmaps, and packs
//! edited bitmaps back into their binary form.
mod bitstream;
/// Error type shared by every module
pub mod error;
/// Options for interpreting a file
pub mod config;
/// Tabular view of pixel intensities
pub mod inspector;
/// Bit depth of the source stream
pub mod mode;
/// Encoder for PGM images
pub mod pgm;
/// PNG encoding and loading of saved images
pub mod png;
/// Defines the raster type and the codec traits
pub mod raster;
/// Codec between raw byte streams and rasters
pub mod raw;
/// Editor state and event dispatch
pub mod session;
/// Reading source files
pub mod source;
/// Zoomed rendering and pointer mapping
pub mod view;

pub use error::{Error, Result};
pub use mode::BitDepth;
pub use raster::Raster;
