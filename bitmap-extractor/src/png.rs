use std::{
    io::Cursor,
    path::{Path, PathBuf},
};

use image::{DynamicImage, GrayImage, ImageFormat};

use crate::{
    error::{Error, Result},
    pgm::PGMEncoder,
    raster::{ImageDecoder, ImageEncoder, Raster},
};

/// Lossless 8-bit grayscale PNG encoder
pub struct PNGEncoder<'raster> {
    raster: &'raster Raster,
}

impl<'raster> PNGEncoder<'raster> {
    /// Supplies the encoder with a raster to encode.
    pub fn new(raster: &'raster Raster) -> Self {
        Self { raster }
    }
}

impl ImageEncoder for PNGEncoder<'_> {
    fn encode(&self) -> Result<Vec<u8>> {
        let image = to_gray_image(self.raster)?;
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageLuma8(image).write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}

/// Decodes a saved PNG or PGM image back into a raster.
///
/// Colour images are converted to 8-bit luma.
pub struct ImageFileDecoder<'data> {
    data: &'data [u8],
}

impl<'data> ImageFileDecoder<'data> {
    /// Initializes the decoder from the bytes of an image file
    pub fn new(data: &'data [u8]) -> Self {
        Self { data }
    }
}

impl ImageDecoder for ImageFileDecoder<'_> {
    fn decode(&self) -> Result<Raster> {
        let image = image::load_from_memory(self.data)?.into_luma8();
        from_gray_image(image)
    }
}

/// Converts a raster into an `image` grayscale buffer.
pub fn to_gray_image(raster: &Raster) -> Result<GrayImage> {
    let width = u32::try_from(raster.width())
        .map_err(|_| Error::Malformed("Raster too wide for an image file"))?;
    let height = u32::try_from(raster.height())
        .map_err(|_| Error::Malformed("Raster too tall for an image file"))?;
    GrayImage::from_raw(width, height, raster.as_bytes().to_vec())
        .ok_or(Error::Malformed("Raster buffer length does not match its dimensions"))
}

/// Converts an `image` grayscale buffer into a raster.
pub fn from_gray_image(image: GrayImage) -> Result<Raster> {
    let width = image.width() as usize;
    let height = image.height() as usize;
    Raster::new(width, height, image.into_raw())
}

/// Saves the raster as an image, picking the format from the extension.
///
/// `.pgm` writes binary PGM; anything else writes PNG.
pub fn save_image(raster: &Raster, path: &Path) -> Result<()> {
    let is_pgm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pgm"));
    if is_pgm {
        PGMEncoder::new(raster).encode_to_file(path)
    } else {
        PNGEncoder::new(raster).encode_to_file(path)
    }
}

/// Loads an image saved by [`save_image`] back into a raster.
pub fn load_image(path: &Path) -> Result<Raster> {
    let data = std::fs::read(path)?;
    let raster = ImageFileDecoder::new(&data).decode()?;
    log::info!(
        "Loaded {}x{} raster from {}",
        raster.width(),
        raster.height(),
        path.display()
    );
    Ok(raster)
}

/// Default output name for rendered images
pub fn default_output_path() -> PathBuf {
    PathBuf::from("output_image.png")
}

#[test]
fn png_is_lossless() {
    let raster = Raster::new(4, 2, vec![0, 1, 127, 128, 200, 254, 255, 42]).unwrap();
    let bytes = PNGEncoder::new(&raster).encode().unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
    let decoded = ImageFileDecoder::new(&bytes).decode().unwrap();
    assert_eq!(decoded, raster);
}

#[test]
fn garbage_is_an_image_error() {
    assert!(matches!(
        ImageFileDecoder::new(b"not an image").decode(),
        Err(Error::Image(_))
    ));
}
