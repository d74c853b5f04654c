use std::{fs, path::Path};

use crate::error::{Error, Result};

/// A grid of 8-bit grayscale intensities stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Raster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Raster {
    /// Wraps an existing buffer. The buffer must hold exactly `width * height` pixels.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width.checked_mul(height) != Some(data.len()) {
            return Err(Error::Malformed(
                "Raster buffer length does not match its dimensions",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Reshapes a flat pixel sequence into rows of `width` pixels.
    ///
    /// Pixels that do not fill a complete row are dropped.
    pub fn from_pixels(width: usize, mut pixels: Vec<u8>) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidWidth(width.to_string()));
        }

        let available = pixels.len();
        let height = available / width;
        if height == 0 {
            return Err(Error::EmptyRaster {
                pixels: available,
                width,
            });
        }

        if available % width != 0 {
            log::debug!(
                "Dropping {} trailing pixel(s) that do not fill a row of {width}",
                available % width
            );
            pixels.truncate(height * width);
        }

        Ok(Self {
            width,
            height,
            data: pixels,
        })
    }

    /// Raster width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Intensity at column `x`, row `y`, or `None` outside the raster.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        self.index(x, y).map(|index| self.data[index])
    }

    /// One row of pixels, or `None` below the last row.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        self.data.get(y * self.width..(y + 1) * self.width)
    }

    /// Iterates over the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.width.max(1))
    }

    /// The flat row-major pixel buffer
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Inverts the pixel at `(x, y)` around the 8-bit range.
    ///
    /// Coordinates outside the raster are ignored. Returns whether a pixel changed.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        match self.index(x, y) {
            Some(index) => {
                self.data[index] = 255 - self.data[index];
                true
            }
            None => false,
        }
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }
}

/// Used to decode a raster. This trait can be implemented for any source format.
pub trait ImageDecoder {
    /// Decodes the raster
    fn decode(&self) -> Result<Raster>;
}

/// Used to encode a raster. This trait can be implemented for any output format.
pub trait ImageEncoder {
    /// Encodes the raster into the bytes of the output format.
    fn encode(&self) -> Result<Vec<u8>>;

    /// Encodes the raster and saves the result to a file at the given path.
    fn encode_to_file(&self, path: &Path) -> Result<()> {
        let bytes = self.encode()?;
        ensure_parent_dir(path)?;
        fs::write(path, bytes)?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[test]
fn from_pixels_truncates_partial_row() {
    let raster = Raster::from_pixels(3, vec![1, 2, 3, 4, 5, 6, 7]).unwrap();
    assert_eq!(raster.width(), 3);
    assert_eq!(raster.height(), 2);
    assert_eq!(raster.as_bytes(), &[1, 2, 3, 4, 5, 6]);
    assert_eq!(raster.row(1), Some(&[4, 5, 6][..]));
    assert_eq!(raster.row(2), None);
    assert_eq!(raster.row(usize::MAX), None);
    assert_eq!(raster.rows().count(), 2);
}

#[test]
fn from_pixels_rejects_degenerate_shapes() {
    assert!(matches!(
        Raster::from_pixels(0, vec![1, 2, 3]),
        Err(Error::InvalidWidth(_))
    ));
    assert!(matches!(
        Raster::from_pixels(4, vec![1, 2, 3]),
        Err(Error::EmptyRaster {
            pixels: 3,
            width: 4
        })
    ));
}

#[test]
fn new_checks_buffer_length() {
    assert!(Raster::new(2, 2, vec![0; 4]).is_ok());
    assert!(matches!(
        Raster::new(2, 2, vec![0; 5]),
        Err(Error::Malformed(_))
    ));
}

#[test]
fn toggle_inverts_in_bounds_pixels() {
    let mut raster = Raster::new(2, 2, vec![0, 10, 200, 255]).unwrap();
    assert!(raster.toggle(1, 0));
    assert_eq!(raster.get(1, 0), Some(245));
    assert!(raster.toggle(1, 0));
    assert_eq!(raster.get(1, 0), Some(10));

    assert!(raster.toggle(0, 1));
    assert_eq!(raster.get(0, 1), Some(55));
}

#[test]
fn toggle_out_of_bounds_is_ignored() {
    let mut raster = Raster::new(2, 2, vec![0, 10, 200, 255]).unwrap();
    let before = raster.clone();
    assert!(!raster.toggle(2, 0));
    assert!(!raster.toggle(0, 2));
    assert!(!raster.toggle(usize::MAX, usize::MAX));
    assert_eq!(raster, before);
    assert_eq!(raster.get(5, 5), None);
}
