//! Test fixtures providing reusable test data without database insertion.
//!
//! Fixtures build in-memory entity models for unit tests that exercise logic
//! without a database, such as fan-out over a list of channel records. They
//! also provide the defaults used by the factories.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let record = fixture::channel_record::entity_builder()
//!     .id(3)
//!     .last_message_id(Some("555"))
//!     .build();
//! ```

pub mod channel_record;
pub mod post_settings;

pub use channel_record::{
    entity as channel_record_entity, entity_builder as channel_record_entity_builder,
};
pub use post_settings::{
    entity as post_settings_entity, entity_builder as post_settings_entity_builder,
};
