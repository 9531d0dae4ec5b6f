//! Generate static files

use anyhow::Result;

use crate::generator::{GenerateStats, Generator};
use crate::Site;

/// Generate the static site from the configured content source
pub async fn run(site: &Site) -> Result<()> {
    run_with_stats(site).await.map(|_| ())
}

/// Generate and report what was written
pub async fn run_with_stats(site: &Site) -> Result<GenerateStats> {
    let start = std::time::Instant::now();

    let source = site.source()?;
    let generator = Generator::new(site, source)?;
    let stats = generator.generate().await?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(stats)
}
