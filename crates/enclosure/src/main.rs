//! Build the enclosure described by `./enclosure.json`, or the reference
//! enclosure when that file is absent.

use std::path::Path;
use std::process::ExitCode;

use csg_kernel::TruckKernel;
use enclosure::{run, EnclosureConfig, EnclosureError, CONFIG_FILE_NAME};

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match build() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "enclosure build failed");
            ExitCode::FAILURE
        }
    }
}

fn build() -> Result<(), EnclosureError> {
    let path = Path::new(CONFIG_FILE_NAME);
    let config = EnclosureConfig::load_or_default(path)?;
    if path.exists() {
        tracing::info!(path = %path.display(), "loaded configuration");
    } else {
        tracing::info!("no {CONFIG_FILE_NAME}; building the reference enclosure");
    }

    let mut kernel = TruckKernel::new();
    let summary = run(&config, &mut kernel)?;
    for file in &summary.stl_files {
        tracing::info!(path = %file.display(), "wrote");
    }
    if let Some(preview) = &summary.preview {
        tracing::info!(path = %preview.display(), "wrote preview");
    }
    Ok(())
}
