//! Configuration types
//!
//! Board-agnostic configuration structures. The user-editable part
//! ([`Settings`]) is stored by the board as postcard binary data; the full
//! [`ClockConfig`] can also be loaded from TOML.

pub mod timing;
pub mod types;

pub use timing::*;
pub use types::*;
