//! Custom dropdown replacing a native `<select>`, with single and multiple
//! selection, grouping, keyboard navigation and text filtering.
//!
//! A [`Dropdown`] is bound to one source control in a [`formdom::Document`].
//! Pages usually create instances through a [`Registry`], which owns the
//! [`LocaleTable`] and fans host events out to every instance.

pub mod config;
pub mod dropdown;
pub mod error;
pub mod events;
pub mod locale;
pub mod option;
pub mod registry;
pub mod render;
pub mod state;

pub use config::DropdownConfig;
pub use dropdown::Dropdown;
pub use error::{JselectError, Result};
pub use events::{CHANGE_EVENT, CREATE_EVENT, EventResult, RELOAD_EVENT};
pub use locale::{Locale, LocaleTable};
pub use option::{DropOption, extract_options};
pub use registry::{Registry, TRIGGER_ATTR};
pub use render::{WidgetNodes, class};
pub use state::{DropdownState, Nav};
