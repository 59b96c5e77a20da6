use anyhow::Result;
use finess_scraper::{fetch, output, pipeline};
use reqwest::Client;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) download the extract ─────────────────────────────────────
    let client = Client::new();
    let text = fetch::download_extract(&client, fetch::SOURCE_URL).await?;

    // ─── 3) transform + write off the async runtime ──────────────────
    let out_path = PathBuf::from(output::OUTPUT_PATH);
    let summary =
        tokio::task::spawn_blocking(move || pipeline::run_pipeline(&text, &out_path)).await??;

    info!(
        establishments = summary.establishments,
        pharmacies = summary.pharmacies,
        "all done"
    );
    Ok(())
}
