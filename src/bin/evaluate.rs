//! Score predicted point sets against the ground truth in a label database.
//!
//! Ground truth comes from the bugs table of a label db; predictions come
//! from a JSON file mapping each filename to its predicted points. Prints
//! per-image and aggregate precision/recall/F1.

use std::path::PathBuf;

use clap::Parser;

use bug_eval::matching::{SetMatcher, DEFAULT_MATCH_THRESHOLD};
use bug_eval::{load_points_from_file, LabelStore};

#[derive(Parser)]
#[command(name = "evaluate")]
#[command(about = "Compare predicted bug points against a ground-truth label db")]
struct Cli {
    /// Path to the ground-truth label database
    #[arg(long)]
    label_db: PathBuf,

    /// Path to the predicted point sets (JSON, filename -> [{x, y}, ...])
    #[arg(long)]
    predictions: PathBuf,

    /// Maximum distance in pixels for a prediction to match a true point
    #[arg(long, default_value_t = DEFAULT_MATCH_THRESHOLD)]
    match_threshold: f64,
}

fn main() {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .and_then(|logger| logger.start())
        .ok();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.match_threshold.is_finite() || cli.match_threshold < 0.0 {
        return Err(format!(
            "match threshold must be a non-negative number, got {}",
            cli.match_threshold
        )
        .into());
    }

    let store = LabelStore::open(&cli.label_db)?;
    let predictions = load_points_from_file(&cli.predictions)?;

    let mut filenames: Vec<String> = store.list_images()?.into_iter().collect();
    filenames.sort();

    let empty = Vec::new();
    let mut matcher = SetMatcher::new();
    for filename in &filenames {
        if !store.has_labels(filename)? {
            log::info!("no labels yet, skipping: {filename}");
            continue;
        }
        let truth = store.get_bugs(filename)?;
        let predicted = predictions.get(filename).unwrap_or(&empty);

        let outcome = matcher.compare(&truth, predicted, cli.match_threshold);
        println!(
            "{filename}: tp={} fn={} fp={}",
            outcome.true_positives(),
            outcome.false_negatives(),
            outcome.false_positives()
        );
    }

    let (tp, fn_, fp) = matcher.counts();
    let (precision, recall, f1) = matcher.precision_recall_f1();
    println!("total: tp={tp} fn={fn_} fp={fp}");
    println!("precision={precision:.4} recall={recall:.4} f1={f1:.4}");

    Ok(())
}
