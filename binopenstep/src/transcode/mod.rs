//! Transcoders from decoded OpenStep values to other formats.

pub mod cbor;
pub mod toml;
pub mod yaml;
