mod cache;
pub mod client_utils;
mod config;
mod delivery;
mod email;
mod errors;
mod profile;
mod resolver;
mod source;
mod storage;
mod types;

pub mod content_test;

pub use cache::{Clock, ResponseCache, SystemClock};
pub use config::{DeliveryConfig, RelayConfig};
pub use delivery::{DeliveryClient, DeliveryClientOptions};
pub use email::{ContactForm, EmailRelay, EmailRelayOptions, FieldError};
pub use errors::*;
pub use profile::{ContactPreferences, Profile};
pub use resolver::{
    about_page_from_entry, blog_post_from_entry, normalize_asset_url, project_from_entry,
    resolve_schema, ProjectResolver,
};
pub use source::ContentSource;
pub use storage::{Comment, EngagementStore, KeyValueStore, MemoryStore, Theme};
pub use types::*;
