mod common;
mod config;
mod draw;

use crate::{common::*, config::Config};
use clap::Parser;
use dataset::Folder;
use indicatif::{ProgressBar, ProgressStyle};

/// Visualize image annotations from a config file.
#[derive(Debug, Clone, Parser)]
struct Args {
    /// configuration file
    #[clap(short, long)]
    config: PathBuf,
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let Args { config } = Args::parse();
    let config = Config::open(&config)
        .with_context(|| format!("failed to load config file '{}'", config.display()))?;

    let folder = Folder::load(
        config.image_dir(),
        config.annotation_path(),
        config.format,
        config.recursive,
    )?;

    let output_dir = match config.output_dir() {
        Some(output_dir) => output_dir,
        None => {
            info!("no output folder set, nothing to render");
            return Ok(());
        }
    };

    let progress = ProgressBar::new(folder.image_annotations.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .progress_chars("#>-"),
    );

    for (image_path, annotations) in &folder.image_annotations {
        let relative = image_path.strip_prefix(&folder.image_dir)?;
        let output_path = output_dir.join(relative);
        let annotations = annotations.as_deref().unwrap_or(&[]);

        if let Err(err) = draw::annotate_image(image_path, annotations, &output_path) {
            warn!("failed to annotate '{}': {}", image_path.display(), err);
        }
        progress.inc(1);
    }
    progress.finish();

    info!(
        "annotated {} of {} images",
        folder.num_annotated(),
        folder.image_annotations.len()
    );

    Ok(())
}
