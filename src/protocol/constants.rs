//! HAL protocol constants.

/// Media types.
pub mod media_types {
    /// HAL documents.
    pub const HAL_JSON: &str = "application/hal+json";
    /// Plain JSON.
    pub const JSON: &str = "application/json";
    /// vnd.error documents.
    pub const VND_ERROR_JSON: &str = "application/vnd.error+json";

    /// Accepted response content types, in preference order.
    pub const ACCEPTED: [&str; 3] = [HAL_JSON, JSON, VND_ERROR_JSON];
}

/// Reserved keys of a HAL document.
pub mod keys {
    /// Link relations map.
    pub const LINKS: &str = "_links";
    /// Embedded resources map.
    pub const EMBEDDED: &str = "_embedded";
    /// Link target attribute.
    pub const HREF: &str = "href";
}

/// Relation names with protocol meaning.
pub mod rels {
    /// The resource's own URI.
    pub const SELF: &str = "self";
    /// Compact URI prefixes.
    pub const CURIES: &str = "curies";
}
