pub mod document;
pub mod element;
pub mod error;
pub mod event;

pub use document::{DispatchedEvent, Document, EventTarget};
pub use element::{Element, NodeId};
pub use error::DomError;
pub use event::{Key, Modifiers, UiEvent};
