pub mod device;
pub mod display;
pub mod icons;
pub mod layout;
pub mod manager;
pub mod model;
pub mod overrides;
pub mod path;
pub mod paths;
pub mod rebind;

pub use device::{Deferred, Device, DeviceChange, DeviceChanged, DeviceGroup, DeviceId, DeviceTracker, InputEvent};
pub use display::{BindingDisplay, BindingResolver, DisplayOptions};
pub use icons::{IconHandle, IconMap, IconMapping, IconResolver, ResolvedIcon};
pub use layout::{LayoutGraph, LayoutTable};
pub use manager::BindingManager;
pub use model::{Action, ActionMap, Binding, ControlScheme, InputCatalog};
pub use overrides::{FileStore, KeyValueStore, MemoryStore, OverrideStore};
pub use path::{normalize_control_path, BindingPath};
pub use rebind::{RebindEngine, RebindState};
