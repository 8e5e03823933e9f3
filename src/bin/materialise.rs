//! Render per-image bug label bitmaps from a label database.
//!
//! For every image marked complete, writes the one-hot bug bitmap as an
//! 8-bit PNG named `<stem>_train_bitmap_bugs.png` in the output directory.
//! Incomplete images are skipped: their label sets may still be mid-entry.

use std::path::PathBuf;

use clap::Parser;

use bug_eval::raster::{points_to_raster, raster_to_image};
use bug_eval::LabelStore;

#[derive(Parser)]
#[command(name = "materialise")]
#[command(about = "Materialise per-image bug label bitmaps from a label db")]
struct Cli {
    /// Path to the label database to materialise bitmaps from
    #[arg(long)]
    label_db: PathBuf,

    /// Directory to write the bitmap PNGs into
    #[arg(long)]
    out_dir: PathBuf,

    /// Source image height in pixels
    #[arg(long)]
    height: usize,

    /// Source image width in pixels
    #[arg(long)]
    width: usize,

    /// Relative scale of the label bitmap compared to the input image
    #[arg(long, default_value_t = 0.5)]
    rescale: f64,
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
    let store = LabelStore::open(&cli.label_db)?;
    std::fs::create_dir_all(&cli.out_dir)?;

    let mut filenames: Vec<String> = store.list_images()?.into_iter().collect();
    filenames.sort();

    for filename in &filenames {
        if !store.get_complete(filename)? {
            log::info!("image labeling not complete, skipping: {filename}");
            continue;
        }

        let bugs = store.get_bugs(filename)?;
        let raster = points_to_raster(&bugs, cli.height, cli.width, cli.rescale)?;
        let img = raster_to_image(&raster);

        let stem = PathBuf::from(filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .ok_or_else(|| format!("cannot derive a file stem from: {filename}"))?;
        let out_path = cli.out_dir.join(format!("{stem}_train_bitmap_bugs.png"));

        println!("writing bitmap image: {}", out_path.display());
        img.save(&out_path)?;
    }

    Ok(())
}
