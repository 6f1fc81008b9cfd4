//! chipfield - token ("chip") input field
//!
//! Free text typed into the field turns into removable chips when a
//! tokenizing character is typed, and an incremental search panel offers
//! candidate objects that can become chips too. State changes follow the Elm
//! Architecture: host events become [`FieldMsg`]s, [`update`] applies them,
//! and side effects come back out as [`Cmd`]s.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod contacts;
pub mod delegate;
pub mod field;
pub mod layout;
pub mod messages;
pub mod search;
pub mod store;
pub mod sync;
pub mod theme;
pub mod token;
pub mod tracing;
pub mod update;
pub mod view;
pub mod worker;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::FieldConfig;
pub use delegate::TokenFieldDelegate;
pub use field::TokenField;
pub use messages::FieldMsg;
pub use theme::Theme;
pub use token::{Token, TokenId};
pub use update::update;
