pub mod overlay;
pub mod preview;
pub mod search;
