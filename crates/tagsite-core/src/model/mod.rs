//! Payloads exchanged with the catalogue API
//!
//! Records are exchanged verbatim; the client only defaults missing fields.

mod de;
mod game;
mod reports;
mod stats;
mod tag;

pub use game::{GameRecord, Nullable, TagLanguage, UNTITLED};
pub use reports::{DeleteAllReport, PurgeReport, SyncReport};
pub use stats::{TagStatEntry, TagStats};
pub use tag::Tag;
