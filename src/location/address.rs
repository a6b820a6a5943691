use url::Url;

use super::{LocationTokens, TokenPattern};

/// Value of the first `param` in the query string, decoded.
pub fn query_token(url: &Url, param: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
}

/// The non-empty segment right after the first `marker` segment.
///
/// `/account/work/dashboard` with marker `account` gives `work`. Empty
/// segments (`//`, trailing `/`) are skipped. Segments are returned as they
/// appear in the URL, without percent-decoding.
pub fn path_token(url: &Url, marker: &str) -> Option<String> {
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    let idx = segments.iter().position(|s| *s == marker)?;
    segments.get(idx + 1).map(|s| (*s).to_owned())
}

pub fn tokens(url: &Url, pattern: &TokenPattern) -> LocationTokens {
    LocationTokens {
        path: path_token(url, &pattern.path_marker),
        query: query_token(url, &pattern.query_param),
    }
}

/// Copy of `url` pointing at `alias`.
///
/// The query parameter is set like `URLSearchParams::set` (first occurrence
/// replaced, later ones dropped, appended if absent). If the path carries
/// the marker followed by a segment, that segment is rewritten as well,
/// percent-encoded so an alias never spans more than one segment.
pub fn with_account(url: &Url, pattern: &TokenPattern, alias: &str) -> Url {
    let mut out = url.clone();
    set_query_token(&mut out, &pattern.query_param, alias);
    set_path_token(&mut out, &pattern.path_marker, alias);
    out
}

fn set_query_token(url: &mut Url, param: &str, value: &str) {
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let mut written = false;
    let mut query = url.query_pairs_mut();
    query.clear();
    for (key, existing) in &pairs {
        if key != param {
            query.append_pair(key, existing);
        } else if !written {
            query.append_pair(key, value);
            written = true;
        }
    }
    if !written {
        query.append_pair(param, value);
    }
}

fn set_path_token(url: &mut Url, marker: &str, value: &str) {
    let mut segments: Vec<String> = match url.path_segments() {
        Some(segments) => segments.map(str::to_owned).collect(),
        None => return,
    };
    let non_empty: Vec<usize> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_empty())
        .map(|(i, _)| i)
        .collect();
    let Some(pos) = non_empty.iter().position(|&i| segments[i] == marker) else {
        return;
    };
    let Some(&target) = non_empty.get(pos + 1) else {
        return;
    };
    let Some(encoded) = encode_segment(url, value) else {
        return;
    };
    segments[target] = encoded;
    let path = format!("/{}", segments.join("/"));
    url.set_path(&path);
}

/// `value` as a single percent-encoded path segment (`/` becomes `%2F`).
///
/// The other segments are already encoded and are written back untouched,
/// so only the new one goes through the url crate's segment encoder.
fn encode_segment(url: &Url, value: &str) -> Option<String> {
    let mut scratch = url.clone();
    scratch.path_segments_mut().ok()?.clear().push(value);
    Some(scratch.path().trim_start_matches('/').to_owned())
}
