use std::io::Write;

use crate::{
    error::Result,
    raster::{ImageEncoder, Raster},
};

/// Binary PGM (P5) encoder
pub struct PGMEncoder<'raster> {
    raster: &'raster Raster,
}

impl<'raster> PGMEncoder<'raster> {
    /// Supplies the encoder with a raster to encode.
    pub fn new(raster: &'raster Raster) -> Self {
        Self { raster }
    }
}

impl ImageEncoder for PGMEncoder<'_> {
    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.raster.pixel_count() + 32);
        writeln!(out, "P5")?;
        writeln!(out, "{} {}", self.raster.width(), self.raster.height())?;
        writeln!(out, "255")?;

        for row in self.raster.rows() {
            out.extend_from_slice(row);
        }
        Ok(out)
    }
}

#[test]
fn writes_header_and_pixels() {
    let raster = Raster::new(3, 2, vec![0, 1, 2, 253, 254, 255]).unwrap();
    let bytes = PGMEncoder::new(&raster).encode().unwrap();
    let header = b"P5\n3 2\n255\n";
    assert_eq!(&bytes[..header.len()], header);
    assert_eq!(&bytes[header.len()..], raster.as_bytes());
}

#[test]
fn output_is_readable_by_image_library() {
    let raster = Raster::new(2, 3, vec![9, 8, 7, 6, 5, 4]).unwrap();
    let bytes = PGMEncoder::new(&raster).encode().unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().into_luma8();
    assert_eq!(decoded.dimensions(), (2, 3));
    assert_eq!(decoded.into_raw(), raster.as_bytes());
}
