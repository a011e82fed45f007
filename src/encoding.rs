use std::borrow::Cow;

use encoding_rs::Encoding;
use xhtmlchardet::detect;

use crate::error::ParseError;

pub(crate) fn encoding(data: &[u8], hint: Option<String>) -> Option<&'static Encoding> {
    let mut cursor = std::io::Cursor::new(data);
    let charsets = detect(&mut cursor, hint).ok()?;
    // no encoding detected
    let label = if charsets.is_empty() {
        "UTF-8"
    } else {
        &charsets[0]
    };
    Encoding::for_label(label.as_bytes())
}

/// Decode raw input into text, detecting its encoding first.
///
/// A byte order mark takes precedence over the detected encoding.
pub(crate) fn decode(data: &[u8], hint: Option<String>) -> Result<Cow<str>, ParseError> {
    let detected = encoding(data, hint).unwrap_or(encoding_rs::UTF_8);
    let (text, used, had_errors) = detected.decode(data);
    if had_errors {
        return Err(ParseError::MalformedEncoding {
            encoding: used.name(),
        });
    }
    Ok(text)
}
