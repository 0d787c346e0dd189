use std::path::PathBuf;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use crate::domain::{CopySummary, ImageRecord, ProjectLayout};
use crate::fs::{copy_dir, write_file};
use crate::manifest::{collect_records, render_manifest};

pub mod domain;
pub mod error;
pub mod fs;
pub mod manifest;

pub use error::BuildError;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Project root that all asset paths are resolved against
    /// [default: current directory]
    #[arg(short, long)]
    pub root: Option<PathBuf>,
}

impl Args {
    /// Resolves the project root once, at startup.
    pub fn layout(&self) -> Result<ProjectLayout, BuildError> {
        let root = match &self.root {
            Some(root) => root.clone(),
            None => std::env::current_dir().map_err(|source| BuildError::Io {
                path: PathBuf::from("."),
                source,
            })?,
        };
        Ok(ProjectLayout::new(root))
    }
}

/// Installs the fmt subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).try_init().ok();
}

/// Copies the meme directories into the build output.
pub fn copy_images(layout: &ProjectLayout) -> Result<Vec<CopySummary>, BuildError> {
    log_context(layout);
    let summaries = layout
        .copy_pairs()
        .iter()
        .map(copy_dir)
        .collect::<Result<Vec<_>, _>>()?;
    info!("Images copied successfully!");
    Ok(summaries)
}

/// Writes the image manifest. Nothing is written if any image fails to probe.
pub fn generate_meme_list(layout: &ProjectLayout) -> Result<Vec<ImageRecord>, BuildError> {
    log_context(layout);
    let records = collect_records(&layout.meme_dir())?;
    let json = render_manifest(&records)?;
    write_file(&layout.manifest_file(), json.as_bytes())?;
    info!("Image list with dimensions generated ({} images)", records.len());
    Ok(records)
}

fn log_context(layout: &ProjectLayout) {
    info!(
        root = %layout.root().display(),
        ci = ProjectLayout::is_ci(),
        "Resolved project root"
    );
}
