//! Core library for tagsite
//!
//! - `model` - tag, game record and statistics payloads
//! - `api` - typed client for the catalogue REST API
//! - `catalogue` - backing store selector with capability flags
//! - `view` - pure filtering, normalization and chip logic shared by the UI
//! - `config` / `paths` - layered configuration and on-disk locations

pub mod api;
pub mod catalogue;
pub mod config;
pub mod model;
pub mod parse;
pub mod paths;
pub mod platform;
pub mod view;

pub use api::{ApiClient, ApiError, SearchQuery};
pub use catalogue::{Capability, Catalogue};
pub use config::Config;
pub use model::{GameRecord, Tag, TagLanguage, TagStatEntry, TagStats};
pub use platform::Platform;
