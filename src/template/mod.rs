//! URI template expansion.
//!
//! Links flagged `templated` carry an [RFC 6570] template in their `href`.
//! Expansion is a pure function of the template and a variable map and is
//! pluggable through [`UriTemplateExpander`]. [`Rfc6570Expander`] is the
//! default and covers levels 1 to 4.
//!
//! # Examples
//!
//! ```
//! use hal_client::template::{Rfc6570Expander, UriTemplateExpander};
//! use serde_json::json;
//!
//! let variables = json!({"page": 1, "limit": 10});
//! let uri = Rfc6570Expander
//!     .expand("/documents{?page,limit}", variables.as_object().unwrap())
//!     .unwrap();
//! assert_eq!(uri, "/documents?page=1&limit=10");
//! ```
//!
//! [RFC 6570]: https://datatracker.ietf.org/doc/html/rfc6570

mod rfc6570;

pub use rfc6570::Rfc6570Expander;

use serde_json::{Map, Value};
use thiserror::Error;

/// Template variables. Strings, numbers and booleans are scalars, arrays are
/// lists and objects are associative arrays. `null` counts as undefined.
pub type Variables = Map<String, Value>;

/// Errors raised while expanding a URI template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `{` with no matching `}`.
    #[error("unterminated expression starting at offset {0}")]
    Unterminated(usize),

    /// An expression that cannot be parsed.
    #[error("invalid expression {{{0}}}")]
    InvalidExpression(String),

    /// A reserved operator such as `=` or `|`.
    #[error("unsupported operator '{0}'")]
    UnsupportedOperator(char),

    /// A `:n` prefix applied to a list or map value.
    #[error("prefix modifier on composite value for variable '{0}'")]
    PrefixOnComposite(String),
}

/// Expands a templated URI against a variable map.
pub trait UriTemplateExpander: Send + Sync {
    /// Expand `template`. Undefined variables expand to nothing.
    fn expand(&self, template: &str, variables: &Variables) -> Result<String, TemplateError>;
}
