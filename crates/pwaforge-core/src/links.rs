//! Link Wrapping
//!
//! Start URLs can be wrapped in a fixed viewer page so that a saved manifest
//! is directly shareable as a plain link. This module wraps/unwraps that
//! prefix and normalizes user-entered start URLs.

use tracing::warn;
use url::Url;

use crate::manifest::Manifest;

/// Viewer page that turns a shared manifest link back into an installable app.
pub const LINK_PREFIX: &str = "https://lumiknit.github.io/apps/pwa/j.html?j=";

/// Strip the viewer prefix (first occurrence) and percent-decode the rest.
pub fn unwrap_link(link: &str) -> String {
    let stripped = link.replacen(LINK_PREFIX, "", 1);
    decode_uri(&stripped)
}

/// Wrap a URL in the shareable viewer link.
///
/// Lossy on purpose: the `http(s)://` scheme is dropped before wrapping, so
/// `unwrap_link(wrap_link(u))` is not guaranteed to reproduce `u` bit for
/// bit. This matches how shared links have always been minted.
pub fn wrap_link(link: &str) -> String {
    let bare = strip_scheme(link);
    format!("{}{}", LINK_PREFIX, encode_uri(&bare))
}

// The viewer page decodes shared links with JS decodeURI, which leaves the
// reserved set (`;/?:@&=+$,#`) untouched in both directions. Mirror that
// here so links minted by this tool and by the page stay interchangeable.
const URI_RESERVED: &[u8] = b";/?:@&=+$,#";
const URI_MARKS: &str = "-_.!~*'()";

/// Percent-encode like JS `encodeURI`: reserved characters and marks pass
/// through, everything else is escaped byte-wise.
fn encode_uri(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut buf = [0u8; 4];
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric()
            || URI_MARKS.contains(ch)
            || (ch.is_ascii() && URI_RESERVED.contains(&(ch as u8)))
        {
            out.push(ch);
        } else {
            out.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        }
    }
    out
}

/// Percent-decode like JS `decodeURI`: escapes of reserved characters stay
/// escaped, a run of escapes that is not valid UTF-8 stays as written.
fn decode_uri(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending: Vec<u8> = Vec::new();
    let mut pending_raw = String::new();
    let mut rest = input;

    loop {
        let Some(pos) = rest.find('%') else {
            flush_pending(&mut out, &mut pending, &mut pending_raw);
            out.push_str(rest);
            return out;
        };
        if pos > 0 {
            flush_pending(&mut out, &mut pending, &mut pending_raw);
            out.push_str(&rest[..pos]);
        }
        match rest.as_bytes().get(pos + 1..pos + 3).and_then(hex_pair) {
            Some(byte) if !URI_RESERVED.contains(&byte) => {
                pending.push(byte);
                pending_raw.push_str(&rest[pos..pos + 3]);
                rest = &rest[pos + 3..];
            }
            Some(_) => {
                flush_pending(&mut out, &mut pending, &mut pending_raw);
                out.push_str(&rest[pos..pos + 3]);
                rest = &rest[pos + 3..];
            }
            None => {
                flush_pending(&mut out, &mut pending, &mut pending_raw);
                out.push('%');
                rest = &rest[pos + 1..];
            }
        }
    }
}

fn flush_pending(out: &mut String, pending: &mut Vec<u8>, pending_raw: &mut String) {
    if pending.is_empty() {
        return;
    }
    match std::str::from_utf8(pending) {
        Ok(decoded) => out.push_str(decoded),
        Err(_) => out.push_str(pending_raw),
    }
    pending.clear();
    pending_raw.clear();
}

fn hex_pair(escape: &[u8]) -> Option<u8> {
    let hi = (escape[0] as char).to_digit(16)?;
    let lo = (escape[1] as char).to_digit(16)?;
    Some((hi * 16 + lo) as u8)
}

/// Remove the first `http://` or `https://` occurring in the string.
fn strip_scheme(link: &str) -> String {
    let mut out = link.to_string();
    let first = [link.find("http://"), link.find("https://")]
        .into_iter()
        .flatten()
        .min();
    if let Some(pos) = first {
        let len = if out[pos..].starts_with("https://") { 8 } else { 7 };
        out.replace_range(pos..pos + len, "");
    }
    out
}

/// Normalize a user-entered start URL: trim, strip the viewer wrapper, and
/// force a scheme when none is present.
pub fn normalize_start_url(url: &str) -> String {
    let url = unwrap_link(url.trim());
    if url.starts_with("http") {
        url
    } else {
        format!("https://{}", url)
    }
}

/// Resolve the URL a saved manifest should open: the editor override when
/// present (made absolute against `start_url` if relative), otherwise
/// `start_url` itself.
pub fn open_url(manifest: &Manifest) -> String {
    let Some(appliable) = manifest.appliable_url.as_deref() else {
        return manifest.start_url.clone();
    };
    if appliable.starts_with("http") {
        return appliable.to_string();
    }
    match Url::parse(&manifest.start_url).and_then(|base| base.join(appliable)) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            warn!("failed to compose open url: {}", e);
            manifest.start_url.clone()
        }
    }
}
