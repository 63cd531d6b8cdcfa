//! Pure view logic shared by every renderer
//!
//! Nothing here touches the terminal or the network, so all of it is
//! covered by plain unit tests.

mod filter;
mod preview;

pub use filter::{filter_games, filter_tags, EmptyReason, TagFilter};
pub use preview::{tag_preview, TagPreview, PREVIEW_TAG_LIMIT};
