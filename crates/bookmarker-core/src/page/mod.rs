//! Page metadata: `<title>` and the first `<link rel="icon">`.

mod favicon;
mod title;

pub use favicon::{data_uri, fetch_favicon, guess_mime, resolve_icon_url, IconLink};
pub use title::normalize_title;

use scraper::{ElementRef, Html};

/// Every element in document order.
fn elements(doc: &Html) -> impl Iterator<Item = ElementRef<'_>> {
    doc.root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
}

/// Metadata pulled from one HTML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    /// Normalized `<title>` text; `None` when missing or blank.
    pub title: Option<String>,
    pub icon: Option<IconLink>,
}

impl PageMeta {
    pub fn parse(html: &str) -> Self {
        let doc = Html::parse_document(html);
        Self {
            title: title::extract_title(elements(&doc)),
            icon: favicon::find_icon_link(elements(&doc)),
        }
    }
}
