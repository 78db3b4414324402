//! Core types: diagnostic errors and tool metadata.

pub mod error;
pub mod tool;
