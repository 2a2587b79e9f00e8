//! File input `accept` filter.

/// Build the value of the file input's `accept` attribute.
///
/// Returns `None` (attribute removed) when no list or an empty list is
/// supplied; otherwise the mime types joined with `,`.
#[must_use]
pub fn accept_filter(mime_types: Option<&[String]>) -> Option<String> {
    match mime_types {
        Some(types) if !types.is_empty() => Some(types.join(",")),
        _ => None,
    }
}
