//! Factory methods for creating test data in the database.
//!
//! Each table has a factory module with a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation. Factory
//! defaults come from the matching fixture.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let record = factory::channel_record::ChannelRecordFactory::new(&db)
//!     .announcement_type("weekly")
//!     .last_message_id("555")
//!     .build()
//!     .await?;
//! ```

pub mod channel_record;
pub mod helpers;
pub mod post_settings;
pub mod user_command;

pub use channel_record::create_channel_record;
pub use post_settings::create_post_settings;
pub use user_command::create_user_command;
