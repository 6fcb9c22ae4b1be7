//! Body decoding: `Content-Type` charset, then a `<meta>` sniff, then UTF-8.

use encoding_rs::{Encoding, UTF_8};

/// How much of the body is searched for a `<meta>` charset declaration.
const SNIFF_BYTES: usize = 1024;

/// `charset` parameter of a `Content-Type` value, unquoted.
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type
        .split(';')
        .skip(1)
        .find_map(|param| {
            let (name, value) = param.split_once('=')?;
            if name.trim().eq_ignore_ascii_case("charset") {
                Some(value.trim().trim_matches(|c| c == '"' || c == '\''))
            } else {
                None
            }
        })
        .filter(|label| !label.is_empty())
}

/// Charset label from `<meta charset=...>` or
/// `<meta http-equiv="Content-Type" content="...; charset=...">` in the first KB.
pub fn sniff_meta_charset(body: &[u8]) -> Option<String> {
    let head = &body[..body.len().min(SNIFF_BYTES)];
    let text = String::from_utf8_lossy(head).to_ascii_lowercase();

    for tag in text.split("<meta").skip(1) {
        let tag = tag.split('>').next().unwrap_or(tag);
        let Some(idx) = tag.find("charset") else {
            continue;
        };
        let Some(value) = tag[idx + "charset".len()..].trim_start().strip_prefix('=') else {
            continue;
        };
        let label: String = value
            .trim_start()
            .trim_start_matches(|c| c == '"' || c == '\'')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
            .collect();
        if !label.is_empty() {
            return Some(label);
        }
    }
    None
}

/// Decodes `body`; unknown labels fall through to the next source.
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_from_content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| {
            sniff_meta_charset(body).and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or(UTF_8);

    let (text, used, had_errors) = encoding.decode(body);
    if had_errors {
        tracing::debug!("body had invalid {} sequences", used.name());
    }
    text.into_owned()
}
