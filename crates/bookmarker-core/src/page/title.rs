use scraper::ElementRef;

/// Text of the first `<title>`, normalized; `None` if absent or blank.
pub(super) fn extract_title<'a>(mut elements: impl Iterator<Item = ElementRef<'a>>) -> Option<String> {
    let el = elements.find(|el| el.value().name() == "title")?;
    let text: String = el.text().collect();
    let title = normalize_title(&text);
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Trims and collapses whitespace runs (titles often wrap across lines).
pub fn normalize_title(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
