//! Configuration types
//!
//! Board-agnostic alert tunables and the `alert.toml` parser.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
