// crates/seccat-cli/src/io/mod.rs

pub mod input;
