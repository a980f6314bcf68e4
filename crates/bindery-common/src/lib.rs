pub mod errors;
pub mod events;
pub mod id;

pub use errors::{BinderyError, ConfigError, IconMapError, StoreError};
pub use events::{BindingEvent, EventBus};
pub use id::{new_id, ActionId, BindingId};

pub type Result<T> = std::result::Result<T, BinderyError>;
