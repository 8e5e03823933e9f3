//! # bug-eval
//!
//! Annotation persistence and detection evaluation for point-like objects
//! ("bugs") in large photographic images.
//!
//! This library provides:
//! - **[`store::LabelStore`]** — SQLite-backed storage of per-image label
//!   sets (bugs, tick marks, valued number boxes) plus a completeness flag,
//!   with strict full-replace write semantics
//! - **[`raster`]** — conversion between point sets and dense
//!   single-channel rasters, both directions
//! - **[`centroids`]** — extraction of discrete detection centroids from a
//!   probability raster via thresholding and connected-component analysis
//! - **[`matching`]** — greedy nearest-neighbor scoring of predicted point
//!   sets against ground truth, with aggregate precision/recall/F1
//!
//! ## Quick Start
//!
//! ```
//! use bug_eval::centroids::{extract_centroids, ExtractConfig};
//! use bug_eval::matching::SetMatcher;
//! use bug_eval::raster::points_to_raster;
//! use bug_eval::types::Point;
//!
//! // rasterize some ground truth, pretend it is model output, and score it
//! let truth = vec![Point::new(10.0, 20.0), Point::new(40.0, 5.0)];
//! let raster = points_to_raster(&truth, 64, 64, 1.0).unwrap();
//! let predicted = extract_centroids(&raster, &ExtractConfig::default());
//!
//! let mut matcher = SetMatcher::new();
//! matcher.compare(&truth, &predicted, 10.0);
//!
//! let (precision, recall, f1) = matcher.precision_recall_f1();
//! assert_eq!((precision, recall, f1), (1.0, 1.0, 1.0));
//! ```
//!
//! Data flows through the system as: annotation UI or evaluation driver →
//! [`store::LabelStore`] (ground truth), model inference (external) →
//! probability raster → [`centroids::extract_centroids`] → predicted points
//! → [`matching::SetMatcher`] → aggregate precision/recall/F1.

pub mod centroids;
pub mod error;
pub mod loader;
pub mod matching;
pub mod metrics;
pub mod raster;
pub mod store;
pub mod types;

// Re-export commonly used types and functions
pub use centroids::{extract_centroids, Connectivity, ExtractConfig};
pub use error::{BugEvalError, Result};
pub use loader::{load_points_from_file, load_points_from_string};
pub use matching::{match_points, MatchOutcome, SetMatcher, DEFAULT_MATCH_THRESHOLD};
pub use raster::{image_to_raster, points_to_raster, raster_to_image};
pub use store::LabelStore;
pub use types::{Label, NumberBox, Point};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_smoke() {
        let point = Point::new(10.0, 20.0);
        assert!(point.is_finite());
    }
}
