//! HTTP GET for pages and favicons.
//!
//! Uses the curl crate (libcurl) with redirects followed, so callers get the
//! effective URL alongside the body. Configured headers are sent on every
//! request; transient failures go through the retry policy.

mod charset;
mod error;
mod retry;

pub use charset::{charset_from_content_type, decode_body, sniff_meta_charset};
pub use error::{classify_curl_error, classify_http_status, FetchError};
pub use retry::{run_with_retry, ErrorKind, RetryDecision, RetryPolicy};

use std::time::Duration;

use crate::config::BookmarkerConfig;

/// Bodies beyond this are truncated; titles and icons live well inside it.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

const MAX_REDIRECTS: u32 = 10;

const MAX_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Request settings shared by every GET in a run.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Total time allowed per attempt.
    pub timeout: Duration,
    /// Extra `(name, value)` headers.
    pub headers: Vec<(String, String)>,
    pub retry: RetryPolicy,
}

impl FetchSettings {
    pub fn from_config(cfg: &BookmarkerConfig) -> Self {
        Self {
            timeout: Duration::from_secs(cfg.timeout),
            headers: cfg
                .headers
                .iter()
                .map(|h| (h.name.clone(), h.value.clone()))
                .collect(),
            retry: RetryPolicy::from_config(cfg.retry.as_ref()),
        }
    }
}

/// Successful (2xx) response.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// URL after following redirects.
    pub effective_url: String,
    pub status: u32,
    /// `Content-Type` header, if sent.
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Body decoded with the declared charset (header, then `<meta>`), else UTF-8.
    pub fn text(&self) -> String {
        decode_body(&self.body, self.content_type.as_deref())
    }
}

/// Blocking GET client. One curl handle per request.
#[derive(Debug, Clone)]
pub struct Fetcher {
    settings: FetchSettings,
    user_agent: String,
}

impl Fetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self {
            settings,
            user_agent: format!("bookmarker/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// GET `url`, retrying transient failures per the configured policy.
    pub fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        run_with_retry(&self.settings.retry, FetchError::kind, || self.get_once(url))
    }

    fn get_once(&self, url: &str) -> Result<FetchResponse, FetchError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(MAX_REDIRECTS)?;
        easy.connect_timeout(self.settings.timeout.min(MAX_CONNECT_TIMEOUT))?;
        easy.timeout(self.settings.timeout)?;
        // Empty string = every encoding libcurl was built with.
        easy.accept_encoding("")?;
        // A configured User-Agent header replaces this.
        easy.useragent(&self.user_agent)?;

        if !self.settings.headers.is_empty() {
            let mut list = curl::easy::List::new();
            for (k, v) in &self.settings.headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))?;
            }
            easy.http_headers(list)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                let room = MAX_BODY_BYTES.saturating_sub(body.len());
                body.extend_from_slice(&data[..data.len().min(room)]);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        let effective_url = easy.effective_url()?.unwrap_or(url).to_string();
        tracing::debug!("GET {} -> HTTP {} ({})", url, status, effective_url);

        if !(200..300).contains(&status) {
            return Err(FetchError::Http {
                url: effective_url,
                status,
            });
        }

        let content_type = easy.content_type()?.map(str::to_string);

        Ok(FetchResponse {
            effective_url,
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HeaderEntry, RetryConfig};

    #[test]
    fn settings_from_config() {
        let cfg = BookmarkerConfig {
            timeout: 5,
            headers: vec![HeaderEntry {
                name: "User-Agent".to_string(),
                value: "Mozilla/5.0".to_string(),
            }],
            retry: Some(RetryConfig::default()),
            ..BookmarkerConfig::default()
        };
        let s = FetchSettings::from_config(&cfg);
        assert_eq!(s.timeout, Duration::from_secs(5));
        assert_eq!(
            s.headers,
            vec![("User-Agent".to_string(), "Mozilla/5.0".to_string())]
        );
        assert_eq!(s.retry.max_attempts, 3);
    }

    #[test]
    fn text_without_charset_is_lossy_utf8() {
        let r = FetchResponse {
            effective_url: "http://x/".to_string(),
            status: 200,
            content_type: None,
            body: vec![b'o', b'k', 0xff],
        };
        assert_eq!(r.text(), "ok\u{fffd}");
    }

    #[test]
    fn text_uses_header_charset() {
        let r = FetchResponse {
            effective_url: "http://x/".to_string(),
            status: 200,
            content_type: Some("text/html; charset=ISO-8859-1".to_string()),
            body: b"<title>Caf\xe9</title>".to_vec(),
        };
        assert_eq!(r.text(), "<title>Caf\u{e9}</title>");
    }

    #[test]
    fn invalid_url_is_curl_error() {
        let f = Fetcher::new(FetchSettings::from_config(&BookmarkerConfig::default()));
        let err = f.get("notascheme://").unwrap_err();
        assert!(matches!(err, FetchError::Curl(_)));
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
