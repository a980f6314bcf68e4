//! Human-readable binding display.
//!
//! Resolution is per binding: each binding reports the layout and control
//! path it resolved to, independent of which device was used last.

mod names;
mod resolver;

pub use names::{control_display_name, layout_display_name, part_display_name};
pub use resolver::{resolve_display, BindingDisplay, BindingResolver, DisplayOptions};
