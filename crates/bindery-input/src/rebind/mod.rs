//! Interactive rebinding.
//!
//! [`RebindEngine`] captures a new control for one binding, or for every
//! part of a composite in sequence, writing overrides into the catalog as
//! it goes. Cancel and timeout abort the whole session.

mod engine;
mod session;

pub use engine::RebindEngine;
pub use session::RebindState;
