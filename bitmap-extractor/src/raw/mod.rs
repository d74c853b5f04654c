mod decode;
mod encode;

use crate::{
    error::Result,
    mode::BitDepth,
    raster::{ImageDecoder, ImageEncoder, Raster},
};

pub use decode::strip_trailing_zeros;

/// Interprets a raw byte stream as a bitmap of a fixed width
pub struct RawDecoder<'data> {
    data: &'data [u8],
    width: usize,
    mode: BitDepth,
}

impl<'data> RawDecoder<'data> {
    /// Initializes the decoder from a byte slice, the raster width and the bit depth
    pub fn new(data: &'data [u8], width: usize, mode: BitDepth) -> Self {
        Self { data, width, mode }
    }
}

impl ImageDecoder for RawDecoder<'_> {
    fn decode(&self) -> Result<Raster> {
        decode::decode(self.data, self.width, self.mode)
    }
}

/// Packs a raster back into a raw byte stream
pub struct RawEncoder<'raster> {
    raster: &'raster Raster,
    mode: BitDepth,
}

impl<'raster> RawEncoder<'raster> {
    /// Supplies the encoder with the raster to pack and the bit depth to pack it with
    pub fn new(raster: &'raster Raster, mode: BitDepth) -> Self {
        Self { raster, mode }
    }
}

impl ImageEncoder for RawEncoder<'_> {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(encode::encode(self.raster, self.mode))
    }
}

/// Decodes `bytes` into a raster `width` pixels wide.
pub fn decode(bytes: &[u8], width: usize, mode: BitDepth) -> Result<Raster> {
    RawDecoder::new(bytes, width, mode).decode()
}

/// Encodes `raster` into a raw byte stream.
pub fn encode(raster: &Raster, mode: BitDepth) -> Vec<u8> {
    encode::encode(raster, mode)
}
