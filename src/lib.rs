//! In-note text search for a markdown notes editor.
//!
//! The crate indexes literal query matches in a note, maps them to line and
//! column positions, drives the plain-text editing surface to the active match,
//! computes the highlight overlay painted above that surface, and highlights the
//! rendered markdown preview tree.

pub mod app;
pub mod config;
pub mod model;
pub mod preview;
pub mod primitives;
pub mod search;
pub mod view;
