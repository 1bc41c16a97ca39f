//! Direct HTTP(S) retrieval

use std::time::Duration;

use cfg_fs::{ConfigDocument, Value};
use reqwest::blocking::Client;
use url::Url;

use crate::{Error, Result};

/// Fetches the body of a URL as text.
///
/// Implemented by [`ReqwestFetcher`]; tests substitute their own.
pub trait HttpFetcher {
    fn fetch_text(&self, url: &Url) -> Result<String>;
}

/// Blocking reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Build a client. `None` disables the request timeout entirely.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| Error::Http {
            url: String::new(),
            message: format!("Failed to create HTTP client: {e}"),
        })?;
        Ok(Self { client })
    }
}

impl HttpFetcher for ReqwestFetcher {
    fn fetch_text(&self, url: &Url) -> Result<String> {
        let http_error = |message: String| Error::Http {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| http_error(e.to_string()))?;
        let bytes = response.bytes().map_err(|e| http_error(e.to_string()))?;

        String::from_utf8(bytes.to_vec()).map_err(|e| http_error(format!("invalid UTF-8: {e}")))
    }
}

/// Fetch and parse a YAML document from `url`.
///
/// The body must be a YAML mapping (or empty). The document's origin is the
/// URL that was fetched.
pub fn fetch_document<F: HttpFetcher>(fetcher: &F, url: &Url) -> Result<ConfigDocument> {
    let text = fetcher.fetch_text(url)?;
    let value: Value = serde_yaml::from_str(&text).map_err(|e| cfg_fs::Error::ConfigParse {
        origin: url.to_string(),
        message: e.to_string(),
    })?;

    match value {
        Value::Mapping(_) | Value::Null => {
            Ok(ConfigDocument::from_value(value).with_origin(url.as_str()))
        }
        _ => Err(Error::NotAMapping {
            url: url.to_string(),
        }),
    }
}
