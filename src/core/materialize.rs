//! Rewrites marker spans to their materialized `~[text:KEY]` references.

use super::scanner::spans;

/// Format of the reference left in a source document once its text lives in a
/// property file.
pub fn text_reference(key: &str) -> String {
    format!("~[text:{key}]")
}

/// Replace every well-formed `[msg:KEY]text[/msg]` span with `~[text:KEY]`.
///
/// The span text is dropped. Content after a malformed marker is left as is,
/// matching what the scanner extracted.
pub fn materialize(document: &str) -> String {
    let mut out = String::with_capacity(document.len());
    let mut last = 0;

    for span in spans(document) {
        out.push_str(&document[last..span.range.start]);
        out.push_str(&text_reference(&span.key));
        last = span.range.end;
    }
    out.push_str(&document[last..]);
    out
}
