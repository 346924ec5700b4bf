use std::borrow::Cow;

#[inline]
fn is_empty_url(part: &str) -> bool {
    part.is_empty() || part == "/"
}

/// Joins URL parts with exactly one `/` between them. Empty parts and a bare
/// `/` are skipped.
pub fn join_url(base: &str, input: &str) -> String {
    if is_empty_url(input) {
        return base.to_string();
    }
    if base.is_empty() {
        return input.to_string();
    }

    let mut out = String::with_capacity(base.len() + input.len() + 1);
    out.push_str(base);
    if !out.ends_with('/') {
        out.push('/');
    }
    out.push_str(input.trim_start_matches('/'));
    out
}

pub fn with_leading_slash(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

/// Replaces a trailing `index` (with or without its slash) by `/`.
pub fn collapse_index(path: &str) -> Cow<'_, str> {
    match path.strip_suffix("index") {
        Some(rest) => {
            let rest = rest.strip_suffix('/').unwrap_or(rest);
            Cow::Owned(format!("{rest}/"))
        }
        None => Cow::Borrowed(path),
    }
}

/// Joins a root path with the relative paths of its descendants.
pub fn full_path<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = parts
        .into_iter()
        .fold(String::new(), |acc, part| join_url(&acc, part));
    with_leading_slash(&joined).into_owned()
}

pub fn has_duplicate_slash(path: &str) -> bool {
    memchr::memmem::find(path.as_bytes(), b"//").is_some()
}
