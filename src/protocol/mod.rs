//! HAL protocol constants and header helpers.
//!
//! - **[constants]** - media types, reserved document keys and relation names
//! - **headers** - Content-Type parsing and `Accept` formatting

pub mod constants;
mod headers;

pub use constants::{keys, media_types, rels};
pub use headers::{format_accept_header, is_accepted_content_type, media_type};
