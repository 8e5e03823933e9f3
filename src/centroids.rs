//! Centroid extraction from a dense probability raster.
//!
//! Thresholds the raster, labels connected foreground regions and reduces
//! each region to its mean pixel position.

use ndarray::Array2;

use crate::types::Point;

/// Pixel adjacency used when labeling connected components.
///
/// Eight-connectivity treats diagonal neighbors as connected, which merges
/// diagonal-adjacent blobs that four-connectivity would count separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Four,
    Eight,
}

impl Connectivity {
    fn offsets(self) -> &'static [(i64, i64)] {
        match self {
            Connectivity::Four => &[(-1, 0), (1, 0), (0, -1), (0, 1)],
            Connectivity::Eight => &[
                (-1, -1),
                (-1, 0),
                (-1, 1),
                (0, -1),
                (0, 1),
                (1, -1),
                (1, 0),
                (1, 1),
            ],
        }
    }
}

/// Configuration for centroid extraction.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Foreground is `value > threshold`, strict inequality.
    /// Default: 0.05
    pub threshold: f32,

    /// Scale applied to emitted coordinates, for rasters produced at a
    /// different resolution than the source image.
    /// Default: 1.0
    pub rescale: f64,

    /// Adjacency used for component labeling.
    /// Default: eight-connectivity
    pub connectivity: Connectivity,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            threshold: 0.05,
            rescale: 1.0,
            connectivity: Connectivity::Eight,
        }
    }
}

/// Extract one centroid per connected foreground region of a probability
/// raster.
///
/// Regions are visited in row-major first-occurrence order and each centroid
/// is the arithmetic mean of its member pixel `(row, col)` positions; there
/// is no intensity weighting. Emitted points are
/// `(x, y) = (floor(col * rescale), floor(row * rescale))` — the raster is
/// indexed `[row][col]` while the rest of the system stores points as
/// `(x, y)` with x = column, so the axes swap here.
///
/// An all-background raster yields an empty list; a single isolated
/// foreground pixel is a valid one-pixel region with itself as centroid.
///
/// # Example
///
/// ```
/// use bug_eval::centroids::{extract_centroids, ExtractConfig};
/// use ndarray::Array2;
///
/// let mut raster = Array2::<f32>::zeros((5, 5));
/// raster[[2, 3]] = 1.0;
///
/// let centroids = extract_centroids(&raster, &ExtractConfig::default());
/// assert_eq!(centroids.len(), 1);
/// assert_eq!((centroids[0].x, centroids[0].y), (3.0, 2.0));
/// ```
pub fn extract_centroids(raster: &Array2<f32>, config: &ExtractConfig) -> Vec<Point> {
    let (h, w) = raster.dim();
    let mut visited = Array2::<bool>::from_elem((h, w), false);
    let mut centroids = Vec::new();
    let offsets = config.connectivity.offsets();

    for row in 0..h {
        for col in 0..w {
            if visited[[row, col]] || raster[[row, col]] <= config.threshold {
                continue;
            }

            // flood-fill one component, accumulating its pixel positions
            let mut stack = vec![(row, col)];
            visited[[row, col]] = true;
            let mut sum_row = 0.0f64;
            let mut sum_col = 0.0f64;
            let mut count = 0usize;

            while let Some((r, c)) = stack.pop() {
                sum_row += r as f64;
                sum_col += c as f64;
                count += 1;

                for &(dr, dc) in offsets {
                    let nr = r as i64 + dr;
                    let nc = c as i64 + dc;
                    if nr < 0 || nc < 0 || nr >= h as i64 || nc >= w as i64 {
                        continue;
                    }
                    let (nr, nc) = (nr as usize, nc as usize);
                    if !visited[[nr, nc]] && raster[[nr, nc]] > config.threshold {
                        visited[[nr, nc]] = true;
                        stack.push((nr, nc));
                    }
                }
            }

            let mean_row = sum_row / count as f64;
            let mean_col = sum_col / count as f64;
            centroids.push(Point::new(
                (mean_col * config.rescale).floor(),
                (mean_row * config.rescale).floor(),
            ));
        }
    }

    centroids
}
