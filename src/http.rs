//! HTTP sampling for remote files, using Range requests so only the bytes
//! needed for sniffing are downloaded.

use std::io::Read;
use std::time::Duration;
use thiserror::Error;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Result of fetching a URL.
pub struct FetchResult {
    /// The fetched bytes.
    pub data: Vec<u8>,
    /// Whether the server honored the Range request.
    pub range_supported: bool,
    /// Total content length, if the server reported one.
    pub content_length: Option<u64>,
}

/// Errors that can occur while fetching a remote sample.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ureq::Error> for HttpError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => HttpError::HttpStatus(code),
            _ => HttpError::Network(err.to_string()),
        }
    }
}

/// Fetch up to `max_bytes` from a URL (the whole resource when `None`).
///
/// A Range request is attempted first; servers that ignore it get their
/// response truncated client-side instead.
pub fn fetch_url(url: &str, max_bytes: Option<usize>) -> Result<FetchResult, HttpError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(HttpError::InvalidUrl(url.to_string()));
    }

    let config = ureq::Agent::config_builder()
        .timeout_global(Some(REQUEST_TIMEOUT))
        .build();
    let agent = ureq::Agent::new_with_config(config);

    let mut request = agent.get(url);
    if let Some(bytes) = max_bytes {
        request = request.header("Range", &format!("bytes=0-{}", bytes.saturating_sub(1)));
    }

    let response = match request.call() {
        Ok(response) => response,
        // Range Not Satisfiable: the file is smaller than the requested
        // window, so take all of it.
        Err(ureq::Error::StatusCode(416)) => agent.get(url).call()?,
        Err(err) => return Err(err.into()),
    };

    // 206 Partial Content means the Range header was honored.
    let range_supported = response.status() == 206;
    let content_length = response
        .headers()
        .get("Content-Range")
        .and_then(|h| h.to_str().ok()?.split('/').next_back()?.parse().ok())
        .or_else(|| {
            response
                .headers()
                .get("Content-Length")
                .and_then(|h| h.to_str().ok()?.parse().ok())
        });

    let mut reader = response.into_body().into_reader();
    let data = match max_bytes {
        Some(bytes) => {
            let mut buf = Vec::with_capacity(bytes);
            reader.take(bytes as u64).read_to_end(&mut buf)?;
            buf
        }
        None => {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf)?;
            buf
        }
    };

    Ok(FetchResult {
        data,
        range_supported,
        content_length,
    })
}
