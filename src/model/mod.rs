//! Core data model: buffer snapshots and match spans

pub mod buffer;
pub mod span;
