//! JSON loading for predicted point sets.
//!
//! The evaluation driver consumes predictions as a JSON object mapping each
//! image filename to its list of points:
//!
//! ```json
//! {
//!     "a.png": [{"x": 10.0, "y": 20.0}, {"x": 30.0, "y": 40.0}],
//!     "b.png": []
//! }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{BugEvalError, Result};
use crate::types::Point;

/// Point sets keyed by image filename.
pub type PointSets = BTreeMap<String, Vec<Point>>;

/// Load point sets from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if any point
/// has a non-finite coordinate.
///
/// # Example
///
/// ```no_run
/// use bug_eval::loader::load_points_from_file;
///
/// let predictions = load_points_from_file("predictions.json").unwrap();
/// println!("Loaded predictions for {} images", predictions.len());
/// ```
pub fn load_points_from_file<P: AsRef<Path>>(path: P) -> Result<PointSets> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let sets: PointSets = serde_json::from_reader(reader)?;
    validate_point_sets(&sets)?;
    Ok(sets)
}

/// Load point sets from a JSON string.
///
/// # Example
///
/// ```
/// use bug_eval::loader::load_points_from_string;
///
/// let json = r#"{"a.png": [{"x": 1.0, "y": 2.0}]}"#;
/// let sets = load_points_from_string(json).unwrap();
/// assert_eq!(sets["a.png"].len(), 1);
/// ```
pub fn load_points_from_string(json_str: &str) -> Result<PointSets> {
    let sets: PointSets = serde_json::from_str(json_str)?;
    validate_point_sets(&sets)?;
    Ok(sets)
}

fn validate_point_sets(sets: &PointSets) -> Result<()> {
    for (filename, points) in sets {
        for point in points {
            if !point.is_finite() {
                return Err(BugEvalError::InvalidPoint(format!(
                    "non-finite coordinate ({}, {}) for {}",
                    point.x, point.y, filename
                )));
            }
        }
    }
    Ok(())
}
