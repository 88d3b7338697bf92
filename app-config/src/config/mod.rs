//! Settings schema, raw sources and backend enumerations.

pub mod backends;
pub mod keys;
pub mod settings;
pub mod source;
