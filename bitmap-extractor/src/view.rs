use image::GrayImage;

use crate::{
    error::{Error, Result},
    png::to_gray_image,
    raster::Raster,
};

const MIN_ZOOM: f32 = 0.25;
const MAX_ZOOM: f32 = 32.0;
/// Zoom multiplier applied per scroll step
const ZOOM_STEP: f32 = 1.25;

/// Zoom state of the raster view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    zoom: f32,
}

impl Default for View {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

impl View {
    /// Current zoom factor
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Sets the zoom factor, clamped to the supported range.
    pub fn set_zoom(&mut self, zoom: f32) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Applies scroll wheel steps: positive zooms in, negative zooms out.
    ///
    /// Large step counts saturate at the zoom limits.
    pub fn scroll(&mut self, steps: i32) {
        let zoom = self.zoom * ZOOM_STEP.powi(steps);
        if !zoom.is_nan() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Maps a point in view space to raster coordinates.
    ///
    /// Points left of or above the image map to `None`. Points past the
    /// right or bottom edge map to coordinates the raster will ignore.
    pub fn to_raster(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        Some(((x / self.zoom) as usize, (y / self.zoom) as usize))
    }

    /// Size of the rendered image for a raster of the given dimensions.
    pub fn scaled_size(&self, width: usize, height: usize) -> (u32, u32) {
        let scale = |side: usize| ((side as f32 * self.zoom).round() as u32).max(1);
        (scale(width), scale(height))
    }

    /// Renders the raster at the current zoom with nearest-neighbor scaling.
    ///
    /// Each output pixel takes the raster pixel that [`View::to_raster`] maps it to,
    /// so clicks land on the pixel drawn under the pointer.
    pub fn render(&self, raster: &Raster) -> Result<GrayImage> {
        if raster.pixel_count() == 0 {
            return Err(Error::EmptyRaster {
                pixels: 0,
                width: raster.width(),
            });
        }

        let image = to_gray_image(raster)?;
        let (width, height) = self.scaled_size(raster.width(), raster.height());
        if (width, height) == image.dimensions() {
            return Ok(image);
        }

        let max_x = image.width() - 1;
        let max_y = image.height() - 1;
        Ok(GrayImage::from_fn(width, height, |x, y| {
            let src_x = ((x as f32 / self.zoom) as u32).min(max_x);
            let src_y = ((y as f32 / self.zoom) as u32).min(max_y);
            *image.get_pixel(src_x, src_y)
        }))
    }
}

#[test]
fn scroll_is_clamped() {
    let mut view = View::default();
    view.scroll(1);
    assert!((view.zoom() - 1.25).abs() < 1e-6);
    view.scroll(-2);
    assert!((view.zoom() - 0.8).abs() < 1e-6);
    view.scroll(100);
    assert_eq!(view.zoom(), MAX_ZOOM);
    view.scroll(-100);
    assert_eq!(view.zoom(), MIN_ZOOM);
    view.set_zoom(f32::NAN);
    assert_eq!(view.zoom(), MIN_ZOOM);
}

#[test]
fn huge_scrolls_saturate() {
    let mut view = View::default();
    view.scroll(500);
    assert_eq!(view.zoom(), MAX_ZOOM);
    view.scroll(-500);
    assert_eq!(view.zoom(), MIN_ZOOM);
    view.scroll(i32::MAX);
    assert_eq!(view.zoom(), MAX_ZOOM);
    view.scroll(i32::MIN);
    assert_eq!(view.zoom(), MIN_ZOOM);
}

#[test]
fn maps_view_points_to_pixels() {
    let mut view = View::default();
    view.set_zoom(4.0);
    assert_eq!(view.to_raster(0.0, 0.0), Some((0, 0)));
    assert_eq!(view.to_raster(3.9, 4.0), Some((0, 1)));
    assert_eq!(view.to_raster(17.0, 9.5), Some((4, 2)));
    assert_eq!(view.to_raster(-1.0, 2.0), None);
    assert_eq!(view.to_raster(2.0, f32::INFINITY), None);
}

#[test]
fn renders_crisp_pixels() {
    let raster = Raster::new(2, 1, vec![0, 255]).unwrap();
    let mut view = View::default();
    view.set_zoom(3.0);
    let image = view.render(&raster).unwrap();
    assert_eq!(image.dimensions(), (6, 3));
    for y in 0..3 {
        for x in 0..6 {
            let expected = if x < 3 { 0 } else { 255 };
            assert_eq!(image.get_pixel(x, y).0[0], expected);
        }
    }
}

#[test]
fn empty_raster_cannot_be_rendered() {
    assert!(matches!(
        View::default().render(&Raster::default()),
        Err(Error::EmptyRaster { .. })
    ));
}

#[test]
fn zoomed_out_render_is_never_empty() {
    let raster = Raster::new(1, 1, vec![7]).unwrap();
    let mut view = View::default();
    view.set_zoom(MIN_ZOOM);
    assert_eq!(view.render(&raster).unwrap().dimensions(), (1, 1));
}
