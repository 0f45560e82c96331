//! Names derived from a target URL: snapshot file stems and display labels.

use regex::Regex;
use std::sync::OnceLock;

/// Longest file stem produced by [`sanitize_filename`].
pub const MAX_FILENAME_LEN: usize = 100;

/// Label used when no host can be read from a URL.
pub const UNKNOWN_SYSTEM: &str = "Unknown System";

/// Turn a URL into a filesystem-safe file stem.
///
/// Strips a leading `http://` or `https://` (any case), replaces every
/// character outside `[A-Za-z0-9-_.]` with `_` and keeps at most
/// [`MAX_FILENAME_LEN`] characters.
pub fn sanitize_filename(url: &str) -> String {
    let rest = strip_scheme(url);
    rest.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILENAME_LEN)
        .collect()
}

fn strip_scheme(url: &str) -> &str {
    for scheme in ["https://", "http://"] {
        if url.len() >= scheme.len()
            && url.is_char_boundary(scheme.len())
            && url[..scheme.len()].eq_ignore_ascii_case(scheme)
        {
            return &url[scheme.len()..];
        }
    }
    url
}

fn host_regex() -> &'static Regex {
    static HOST: OnceLock<Regex> = OnceLock::new();
    HOST.get_or_init(|| Regex::new(r"(?i)^https?://([^/]+)").expect("host regex is valid"))
}

/// Human-readable label for the system behind a URL.
///
/// `https://homcetas.oci.ibama.gov.br/login` becomes `"Homcetas"` and
/// `https://audit-trail.example.org` becomes `"Audit Trail"`. Anything without
/// a `scheme://host` prefix yields [`UNKNOWN_SYSTEM`].
pub fn extract_system_name(url: &str) -> String {
    let Some(host) = host_regex()
        .captures(url.trim())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
    else {
        return UNKNOWN_SYSTEM.to_string();
    };

    let label = host.split('.').next().unwrap_or_default();
    if label.is_empty() {
        return UNKNOWN_SYSTEM.to_string();
    }
    title_case(&label.replace('-', " "))
}

/// Upper-case the first letter of every run of letters, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}
