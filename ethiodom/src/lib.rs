pub mod dispatch;
pub mod document;
pub mod element;
pub mod event;
pub mod focus;
pub mod selector;

pub use dispatch::{Handler, ListenerId};
pub use document::{Document, NodeId, NodeKind};
pub use element::{Content, Element};
pub use event::{Event, EventDetail, EventKind, Key};
pub use focus::{collect_focusable, FocusState, FOCUSABLE_SELECTOR};
pub use selector::{Selector, SelectorError};
