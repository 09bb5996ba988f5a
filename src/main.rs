// This file is an example of how to use the `spot_vision` library.
// The main library entry point is `src/lib.rs`; image loading lives here, not there.

use anyhow::Context;
use spot_vision::pipeline::DetectionPipeline;
use spot_vision::DetectorConfig;
use std::env;

fn env_override<T: std::str::FromStr>(name: &str) -> anyhow::Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => Ok(Some(raw.parse().with_context(|| format!("invalid {name}: {raw}"))?)),
        Err(_) => Ok(None),
    }
}

fn config_from_env() -> anyhow::Result<DetectorConfig> {
    let mut config = DetectorConfig::new();
    if let Some(threshold) = env_override("SPOT_THRESHOLD")? {
        config = config.set_threshold(threshold);
    }
    if let Some(min_area) = env_override("SPOT_MIN_AREA")? {
        config = config.set_min_area(min_area);
    }
    if let Some(region_size) = env_override("SPOT_REGION_SIZE")? {
        config = config.set_region_size(region_size);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let Some(path) = env::args().nth(1) else {
        println!("Usage: spot_vision <image_path>");
        return Ok(());
    };

    let config = config_from_env()?;
    let pipeline = DetectionPipeline::new(config)?;

    tracing::info!("Loading image: {}", path);
    let image = image::open(&path).with_context(|| format!("failed to open image {path}"))?;

    let analysis = pipeline.analyze(&image)?;
    let crops = pipeline.crop_candidates(&image, &analysis.candidates)?;
    tracing::info!("Detected {} candidates", analysis.candidates.len());

    for (candidate, crop) in analysis.candidates.iter().zip(&crops) {
        let window = crop.window();
        tracing::info!(
            "candidate at ({}, {}) area={:.1} crop={}x{}+{}+{}",
            candidate.x,
            candidate.y,
            candidate.area,
            window.width,
            window.height,
            window.x,
            window.y
        );
    }
    Ok(())
}
