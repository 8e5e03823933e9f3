//! Conversion between point sets and dense single-channel rasters.
//!
//! Rasters are `ndarray::Array2<f32>` indexed `[row][col]` with values in
//! `[0, 1]`; points are `(x, y)` with x = column, y = row. The 8-bit
//! [`image::GrayImage`] form is used for persistence and visualization.

use image::GrayImage;
use ndarray::Array2;

use crate::error::{BugEvalError, Result};
use crate::types::Point;

/// One-hot encode a point set into a raster of shape
/// `(floor(height * rescale), floor(width * rescale))`.
///
/// For each point the cell at `(floor(y * rescale), floor(x * rescale))` is
/// set to 1.0. Two points colliding on the same cell after rescale produce a
/// single set cell.
///
/// # Arguments
///
/// * `points` - Points in `(x, y)` pixel coordinates
/// * `height` - Source image height in pixels
/// * `width` - Source image width in pixels
/// * `rescale` - Scale applied to both the destination shape and the points
///
/// # Errors
///
/// Returns [`BugEvalError::OutOfRange`] if any scaled coordinate falls
/// outside the destination raster. This usually signals wrong height/width
/// arguments upstream, so the point is never silently clipped.
///
/// # Example
///
/// ```
/// use bug_eval::raster::points_to_raster;
/// use bug_eval::types::Point;
///
/// let raster = points_to_raster(&[Point::new(3.0, 1.0)], 4, 8, 1.0).unwrap();
/// assert_eq!(raster.dim(), (4, 8));
/// assert_eq!(raster[[1, 3]], 1.0);
/// ```
pub fn points_to_raster(
    points: &[Point],
    height: usize,
    width: usize,
    rescale: f64,
) -> Result<Array2<f32>> {
    let out_h = (height as f64 * rescale).floor() as usize;
    let out_w = (width as f64 * rescale).floor() as usize;
    let mut raster = Array2::<f32>::zeros((out_h, out_w));

    for point in points {
        let row = (point.y * rescale).floor();
        let col = (point.x * rescale).floor();
        let in_bounds = row.is_finite()
            && col.is_finite()
            && row >= 0.0
            && col >= 0.0
            && row < out_h as f64
            && col < out_w as f64;
        if !in_bounds {
            return Err(BugEvalError::OutOfRange(format!(
                "point ({}, {}) maps to cell ({}, {}) outside {}x{} raster; \
                 are height and width correct?",
                point.x, point.y, row, col, out_h, out_w
            )));
        }
        raster[[row as usize, col as usize]] = 1.0;
    }

    Ok(raster)
}

/// Convert a float raster to an 8-bit single-channel image, linearly
/// mapping `[0, 1]` to `[0, 255]`.
pub fn raster_to_image(raster: &Array2<f32>) -> GrayImage {
    let (h, w) = raster.dim();
    GrayImage::from_fn(w as u32, h as u32, |x, y| {
        let v = raster[[y as usize, x as usize]].clamp(0.0, 1.0);
        image::Luma([(v * 255.0).round() as u8])
    })
}

/// Convert an 8-bit single-channel image back to a float raster, linearly
/// mapping `[0, 255]` to `[0, 1]`.
pub fn image_to_raster(img: &GrayImage) -> Array2<f32> {
    let (w, h) = img.dimensions();
    Array2::from_shape_fn((h as usize, w as usize), |(row, col)| {
        f32::from(img.get_pixel(col as u32, row as u32).0[0]) / 255.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hot_encoding() {
        let points = vec![Point::new(0.0, 0.0), Point::new(7.0, 3.0)];
        let raster = points_to_raster(&points, 4, 8, 1.0).unwrap();
        assert_eq!(raster.dim(), (4, 8));
        assert_eq!(raster[[0, 0]], 1.0);
        assert_eq!(raster[[3, 7]], 1.0);
        assert_eq!(raster.sum(), 2.0);
    }

    #[test]
    fn test_rescale_shrinks_destination() {
        let points = vec![Point::new(10.0, 6.0)];
        let raster = points_to_raster(&points, 10, 20, 0.5).unwrap();
        assert_eq!(raster.dim(), (5, 10));
        assert_eq!(raster[[3, 5]], 1.0);
    }

    #[test]
    fn test_colliding_points_set_once() {
        // both land on cell (1, 1) at rescale 0.5
        let points = vec![Point::new(2.0, 2.0), Point::new(3.0, 3.0)];
        let raster = points_to_raster(&points, 8, 8, 0.5).unwrap();
        assert_eq!(raster[[1, 1]], 1.0);
        assert_eq!(raster.sum(), 1.0);
    }

    #[test]
    fn test_out_of_range_is_an_error() {
        let points = vec![Point::new(8.0, 0.0)];
        let result = points_to_raster(&points, 4, 8, 1.0);
        assert!(matches!(result, Err(BugEvalError::OutOfRange(_))));

        let negative = vec![Point::new(-1.0, 0.0)];
        assert!(points_to_raster(&negative, 4, 8, 1.0).is_err());
    }

    #[test]
    fn test_image_round_trip() {
        let points = vec![Point::new(1.0, 2.0), Point::new(5.0, 0.0)];
        let raster = points_to_raster(&points, 4, 8, 1.0).unwrap();
        let img = raster_to_image(&raster);
        let back = image_to_raster(&img);
        assert_eq!(back, raster);
    }
}
