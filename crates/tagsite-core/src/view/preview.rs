//! Truncated tag-chip previews for search results

/// Chips shown before collapsing the rest into `+N`
pub const PREVIEW_TAG_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPreview<'a> {
    pub shown: &'a [String],
    /// Tags left out of `shown`
    pub overflow: usize,
}

pub fn tag_preview(tags: &[String]) -> TagPreview<'_> {
    let shown = &tags[..tags.len().min(PREVIEW_TAG_LIMIT)];
    TagPreview {
        shown,
        overflow: tags.len() - shown.len(),
    }
}
