use anyhow::{anyhow, Result};
use reqwest::Url;
use tracing::debug;

/// Served next to `index.html`, at the site root. The download link points at
/// the same path so that an export is always the file the dashboard last
/// loaded.
pub const CSV_PATH: &str = "batterydata_converted.csv";

pub fn csv_href() -> String {
    format!("/{CSV_PATH}")
}

pub async fn fetch_csv(path: &str) -> Result<String> {
    // Resolved against the origin, the page url depends on the active route
    let base = leptos::window()
        .location()
        .origin()
        .map_err(|err| anyhow!("location origin error: {err:?}"))?;
    let url = resolve_url(&base, path)?;

    debug!(%url, "fetching csv");

    let response = reqwest::Client::new()
        .get(url)
        .send()
        .await?
        .error_for_status()?;
    let text = response.text().await?;

    debug!(bytes = text.len(), "csv fetched");

    Ok(text)
}

// reqwest only accepts absolute urls, even in the browser
fn resolve_url(base: &str, path: &str) -> Result<Url> {
    Ok(Url::parse(base)?.join(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_relative_to_origin() {
        let url = resolve_url("http://localhost:8080", CSV_PATH).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/batterydata_converted.csv");
        assert_eq!(url.path(), csv_href());
    }

    #[test]
    fn invalid_base_is_an_error() {
        assert!(resolve_url("not a url", CSV_PATH).is_err());
    }
}
