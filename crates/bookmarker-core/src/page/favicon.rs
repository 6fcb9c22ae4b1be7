//! Favicon discovery and `data:` URI encoding.

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use scraper::ElementRef;
use url::Url;

use crate::fetch::Fetcher;

/// Used when neither the link, the URL, nor the response says what the icon is.
const FALLBACK_MIME: &str = "image/x-icon";

/// A `<link rel="icon">` as found in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLink {
    /// Raw `href`, possibly relative or a `data:` URI.
    pub href: String,
    /// The link's `type` attribute.
    pub mime_type: Option<String>,
}

/// First `<link>` whose `rel` contains the word `icon` (any case) and has a non-empty `href`.
pub(super) fn find_icon_link<'a>(
    mut elements: impl Iterator<Item = ElementRef<'a>>,
) -> Option<IconLink> {
    elements.find_map(|el| {
        if el.value().name() != "link" {
            return None;
        }
        let rel = el.value().attr("rel")?;
        if !rel
            .split_ascii_whitespace()
            .any(|word| word.eq_ignore_ascii_case("icon"))
        {
            return None;
        }
        let href = el.value().attr("href")?.trim();
        if href.is_empty() {
            return None;
        }
        Some(IconLink {
            href: href.to_string(),
            mime_type: el
                .value()
                .attr("type")
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        })
    })
}

/// Resolves `href` against the page's effective URL.
pub fn resolve_icon_url(page_url: &str, href: &str) -> Result<String> {
    let base = Url::parse(page_url).with_context(|| format!("parse page URL {}", page_url))?;
    let joined = base
        .join(href)
        .with_context(|| format!("resolve icon href {:?} against {}", href, page_url))?;
    Ok(joined.into())
}

/// MIME type guessed from the URL path's extension.
pub fn guess_mime(icon_url: &str) -> Option<String> {
    let path = Url::parse(icon_url).ok()?.path().to_string();
    mime_guess::from_path(path).first_raw().map(str::to_string)
}

/// `data:<mime>;base64,<payload>`
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Fetches the icon and returns it as a `data:` URI. `data:` hrefs are returned as is.
pub fn fetch_favicon(fetcher: &Fetcher, page_url: &str, link: &IconLink) -> Result<String> {
    if link.href.starts_with("data:") {
        return Ok(link.href.clone());
    }

    let icon_url = resolve_icon_url(page_url, &link.href)?;
    tracing::debug!("fetching favicon {}", icon_url);
    let resp = fetcher
        .get(&icon_url)
        .with_context(|| format!("fetch favicon {}", icon_url))?;

    // Content-Type may carry parameters ("image/png; charset=binary").
    let response_mime = resp
        .content_type
        .as_deref()
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .filter(|ct| !ct.is_empty())
        .map(str::to_string);

    let mime = link
        .mime_type
        .clone()
        .or_else(|| guess_mime(&icon_url))
        .or(response_mime)
        .unwrap_or_else(|| FALLBACK_MIME.to_string());
    tracing::debug!("mime_type = {}", mime);

    Ok(data_uri(&mime, &resp.body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BookmarkerConfig;
    use crate::fetch::FetchSettings;

    #[test]
    fn resolve_relative_and_absolute_hrefs() {
        assert_eq!(
            resolve_icon_url("https://example.com/docs/page.html", "icon.png").unwrap(),
            "https://example.com/docs/icon.png"
        );
        assert_eq!(
            resolve_icon_url("https://example.com/docs/page.html", "/favicon.ico").unwrap(),
            "https://example.com/favicon.ico"
        );
        assert_eq!(
            resolve_icon_url("https://example.com/", "//cdn.example.net/i.svg").unwrap(),
            "https://cdn.example.net/i.svg"
        );
        assert_eq!(
            resolve_icon_url("https://example.com/", "https://other.org/x.ico").unwrap(),
            "https://other.org/x.ico"
        );
    }

    #[test]
    fn resolve_with_bad_page_url_is_error() {
        assert!(resolve_icon_url("not a url", "/favicon.ico").is_err());
    }

    #[test]
    fn guess_mime_from_extension() {
        assert_eq!(
            guess_mime("https://example.com/a/icon.png?v=3").as_deref(),
            Some("image/png")
        );
        assert_eq!(
            guess_mime("https://example.com/icon.svg").as_deref(),
            Some("image/svg+xml")
        );
        assert_eq!(guess_mime("https://example.com/icon"), None);
    }

    #[test]
    fn data_href_is_returned_without_fetching() {
        let fetcher = Fetcher::new(FetchSettings::from_config(&BookmarkerConfig::default()));
        let link = IconLink {
            href: "data:image/png;base64,AAAA".to_string(),
            mime_type: Some("image/gif".to_string()),
        };
        // The page URL is never parsed for data: hrefs.
        assert_eq!(
            fetch_favicon(&fetcher, "not a url", &link).unwrap(),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn data_uri_uses_standard_base64() {
        assert_eq!(data_uri("image/png", b"hi?"), "data:image/png;base64,aGk/");
    }
}
