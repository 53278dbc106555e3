//! Rendering resolved tables: TOML text and toml-test tagged JSON.

#[cfg(feature = "json")]
pub mod json;
pub mod primitives;
mod printer;
pub mod writer;

#[cfg(feature = "json")]
pub use json::to_tagged_json;
pub use printer::{to_string, to_string_with_key_order, KeyOrder};
