use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use super::SegmentToken;

/// Characters escaped in static path text; `/` and `:` are left alone.
const PATH_TEXT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'^')
    .add(b'|')
    .add(b'\\');

/// Percent-encodes literal path text and escapes `:` so the matcher never
/// reads it as a parameter marker.
pub fn encode_static(text: &str) -> String {
    utf8_percent_encode(text, PATH_TEXT)
        .to_string()
        .replace(':', "\\:")
}

/// Compiles the tokens of one segment into a matcher path fragment that
/// starts with `/`.
///
/// `has_following_segment` narrows a catchall to `[^/]*` so it cannot
/// swallow static segments that follow it in the same branch.
#[tracing::instrument(level = "trace", skip(tokens), fields(tokens = tokens.len() as u64))]
pub fn compile_segment(tokens: &[SegmentToken], has_following_segment: bool) -> String {
    let mut out = String::from("/");

    for token in tokens {
        match token {
            SegmentToken::Optional(name) => {
                out.push(':');
                out.push_str(name);
                out.push('?');
            }
            SegmentToken::Dynamic(name) => {
                out.push(':');
                out.push_str(name);
                out.push_str("()");
            }
            SegmentToken::Catchall(name) => {
                out.push(':');
                out.push_str(name);
                out.push_str(if has_following_segment {
                    "([^/]*)*"
                } else {
                    "(.*)*"
                });
            }
            SegmentToken::Group(_) => {}
            SegmentToken::Static(text) => out.push_str(&encode_static(text)),
        }
    }

    out
}
