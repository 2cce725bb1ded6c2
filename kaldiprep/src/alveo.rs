use std::io::Write;
use std::path::Path;

use futures_util::StreamExt;
use tracing::{debug, warn};

use crate::config::Credentials;
use crate::error::{Error, Result};
use crate::source::DocumentSource;

/// Header carrying the API key on every request.
const API_KEY_HEADER: &str = "X-API-KEY";

/// Client for the Alveo content API.
pub struct AlveoClient {
    credentials: Credentials,
    http: reqwest::Client,
}

impl AlveoClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            http: reqwest::Client::new(),
        }
    }

    /// Absolute URL of a document reference.
    ///
    /// References that are already absolute URLs are used unchanged.
    pub fn document_url(&self, reference: &str) -> Result<String> {
        let reference = reference.trim();
        if reference.starts_with("https://") || reference.starts_with("http://") {
            return Ok(reference.to_string());
        }
        if reference.is_empty() {
            return Err(Error::Download("empty document reference".into()));
        }
        Ok(format!(
            "{}/{}",
            self.credentials.api_url.trim_end_matches('/'),
            reference.trim_start_matches('/')
        ))
    }
}

impl DocumentSource for AlveoClient {
    async fn download_document(&self, reference: &str, dest: &Path) -> Result<u64> {
        let url = self.document_url(reference)?;
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.credentials.api_key)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Download(format!("{reference}: {e}")))?;

        let expected = response.content_length();

        // Stream into a sibling temp file, then move it into place.
        let tmp_path = dest.with_extension("wav.part");
        let written = match stream_to_file(response, &tmp_path).await {
            Ok(n) => n,
            Err(e) => {
                std::fs::remove_file(&tmp_path).ok();
                return Err(e);
            }
        };

        std::fs::rename(&tmp_path, dest)?;

        if let Some(expected) = expected {
            if expected != written {
                warn!(
                    %reference,
                    expected,
                    actual = written,
                    "document size mismatch — recording may be truncated"
                );
            }
        }

        debug!(%url, bytes = written, "document saved");
        Ok(written)
    }
}

async fn stream_to_file(response: reqwest::Response, path: &Path) -> Result<u64> {
    let mut file = std::fs::File::create(path)?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)?;
        written += chunk.len() as u64;
    }

    file.flush()?;
    Ok(written)
}
