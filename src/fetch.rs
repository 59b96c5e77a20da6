// src/fetch.rs

use anyhow::{bail, Context, Result};
use encoding_rs::WINDOWS_1252;
use reqwest::Client;
use tracing::info;
use url::Url;

/// FINESS establishment extract ("stock" snapshot) published on data.gouv.fr.
pub static SOURCE_URL: &str = "https://static.data.gouv.fr/resources/finess-extraction-du-fichier-des-etablissements/20200305-105408/etalab-cs1100507-stock-20200304-0416.csv";

/// Download the extract at `url` and decode it from Windows-1252.
/// Any HTTP failure or undecodable byte aborts the run.
pub async fn download_extract(client: &Client, url: &str) -> Result<String> {
    let url = Url::parse(url).with_context(|| format!("parsing source URL {}", url))?;
    let name = url
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .unwrap_or("extract.csv")
        .to_string();

    info!(name = %name, "downloading");
    let resp = client
        .get(url.as_str())
        .send()
        .await
        .with_context(|| format!("GET {}", url))?
        .error_for_status()?;
    let bytes = resp
        .bytes()
        .await
        .with_context(|| format!("reading body from {}", url))?;
    info!(name = %name, bytes = bytes.len(), "downloaded");

    let (text, _, had_errors) = WINDOWS_1252.decode(&bytes);
    if had_errors {
        bail!("{} is not valid Windows-1252", name);
    }
    Ok(text.into_owned())
}
