//! Content negotiation helpers.
//!
//! | Header | Direction | Example |
//! |--------|-----------|---------|
//! | Accept | request | `application/hal+json, application/json, application/vnd.error+json` |
//! | Content-Type | response | `application/hal+json; charset=utf-8` |
//!
//! # Examples
//!
//! ```
//! use hal_client::protocol::{format_accept_header, is_accepted_content_type, media_type};
//!
//! assert_eq!(media_type("application/json; charset=utf-8"), "application/json");
//! assert!(is_accepted_content_type(
//!     "application/hal+json;charset=UTF-8",
//!     &["application/hal+json"],
//! ));
//! assert_eq!(format_accept_header(&["a/b", "c/d"]), "a/b, c/d");
//! ```

use regex::Regex;
use std::sync::OnceLock;

fn content_type_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([^;]+)(;\s?(charset|boundary)=(.+))?$")
            .expect("content type pattern is valid")
    })
}

/// Strip a `;charset=...` or `;boundary=...` suffix from a Content-Type value.
///
/// Any other parameter is left in place, so such a value never matches a
/// bare media type.
pub fn media_type(value: &str) -> &str {
    let value = value.trim();
    match content_type_pattern().captures(value) {
        Some(captures) => captures.get(1).map_or(value, |m| m.as_str().trim()),
        None => value,
    }
}

/// Whether a Content-Type header line names exactly one of `accepted`.
///
/// `header_line` is every Content-Type value joined with `", "`, so a
/// response declaring several content types is rejected.
pub fn is_accepted_content_type<S: AsRef<str>>(header_line: &str, accepted: &[S]) -> bool {
    let declared = media_type(header_line);
    accepted
        .iter()
        .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(declared))
}

/// Join media types into an `Accept` header value.
#[inline]
pub fn format_accept_header<S: AsRef<str>>(media_types: &[S]) -> String {
    media_types
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}
