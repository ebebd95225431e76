//! Low-level primitives
//!
//! Text matching, offset/line mapping, display widths and timers. Nothing
//! in here knows about surfaces, overlays or the preview tree.

pub mod display_width;
pub mod offset_index;
pub mod position;
pub mod timer;
