//! Navigable HAL resources.
//!
//! A [`HalResource`] is built from one JSON document. Its `_links` become
//! [`HalLink`]s and its `_embedded` entries become child resources, both
//! normalized once at construction so that lookups never re-inspect the raw
//! JSON shape.
//!
//! | Lookup | Unknown relation | Empty relation |
//! |--------|------------------|----------------|
//! | `has_link` / `has_resource` | `false` | `true` |
//! | `link` / `resource` | `InvalidRelationError` | empty list |
//! | `first_link` / `first_resource` | `InvalidRelationError` | `None` |

mod link;
mod relation;
#[allow(clippy::module_inception)]
mod resource;

pub use link::HalLink;
pub use relation::Entry;
pub use resource::HalResource;
