//! Event handling for the dropdown widget.
//!
//! Keyboard and pointer-down listeners are global: every instance sees every
//! such event and decides for itself whether it applies. Click, hover and
//! input events carry a target node and only concern the instance owning it.

use formdom::{Document, Key, Modifiers, NodeId, UiEvent};

use crate::dropdown::Dropdown;
use crate::error::Result;
use crate::state::Nav;

/// Fired on the hidden value carrier whenever the selection changes.
pub const CHANGE_EVENT: &str = "jselect-change";
/// Fired on the window after an instance is built.
pub const CREATE_EVENT: &str = "jselect-create";
/// Fired on a source control by page code to request a full rebuild.
pub const RELOAD_EVENT: &str = "jselect-reload";

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed (the host should prevent its default action).
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }

    /// Consumed if either side is.
    pub fn or(self, other: EventResult) -> EventResult {
        if self.is_handled() || other.is_handled() {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}

impl Dropdown {
    /// Route one host event to this instance.
    ///
    /// Reload requests are not handled here since they need the locale
    /// table; see [`Registry::dispatch`](crate::Registry::dispatch).
    pub fn handle_event(&mut self, doc: &mut Document, event: &UiEvent) -> Result<EventResult> {
        match event {
            UiEvent::Key { key, modifiers } => self.on_key(doc, *key, *modifiers),
            UiEvent::PointerDown { target } => self.on_pointer_down(doc, *target),
            UiEvent::Click { target } => self.on_click(doc, *target),
            UiEvent::Hover { target } => self.on_hover(doc, *target),
            UiEvent::Input { target, value } => self.on_input(doc, *target, value),
            UiEvent::Custom { .. } => Ok(EventResult::Ignored),
        }
    }

    fn on_key(&mut self, doc: &mut Document, key: Key, modifiers: Modifiers) -> Result<EventResult> {
        if modifiers.is_chord() {
            return Ok(EventResult::Ignored);
        }

        let nav = match key {
            Key::Enter => return self.on_enter(doc),
            Key::Escape => {
                if !self.is_open() {
                    return Ok(EventResult::Ignored);
                }
                self.close(doc)?;
                return Ok(EventResult::Consumed);
            }
            Key::Up => Nav::Up,
            Key::Down => Nav::Down,
            Key::PageUp => Nav::First,
            Key::PageDown => Nav::Last,
            _ => return Ok(EventResult::Ignored),
        };

        if !self.is_open() {
            return Ok(EventResult::Ignored);
        }
        self.navigate(doc, nav)?;
        Ok(EventResult::Consumed)
    }

    fn on_enter(&mut self, doc: &mut Document) -> Result<EventResult> {
        let root = self.nodes().root;
        let focused_inside = doc
            .active_element()
            .is_some_and(|active| doc.contains(root, active));
        if !focused_inside {
            return Ok(EventResult::Ignored);
        }

        if self.is_open() {
            match self.state().current_key() {
                Some(key) => {
                    self.toggle_and_close(doc, key)?;
                }
                None => self.close(doc)?,
            }
        } else if !self.is_disabled() {
            self.open(doc)?;
        }
        Ok(EventResult::Consumed)
    }

    fn on_pointer_down(&mut self, doc: &mut Document, target: Option<NodeId>) -> Result<EventResult> {
        let root = self.nodes().root;
        let inside = target.is_some_and(|t| doc.contains(root, t));
        if inside || !self.is_open() {
            return Ok(EventResult::Ignored);
        }
        self.close(doc)?;
        Ok(EventResult::Consumed)
    }

    fn on_click(&mut self, doc: &mut Document, target: NodeId) -> Result<EventResult> {
        if doc.contains(self.nodes().display, target) {
            if self.is_open() {
                self.close(doc)?;
            } else if !self.is_disabled() {
                self.open(doc)?;
            }
            return Ok(EventResult::Consumed);
        }

        let Some(key) = self.nodes().option_at(doc, target) else {
            return Ok(EventResult::Ignored);
        };
        if self.state().option(key).is_none_or(|o| o.disabled) {
            return Ok(EventResult::Ignored);
        }
        self.toggle_and_close(doc, key)?;
        Ok(EventResult::Consumed)
    }

    fn on_hover(&mut self, doc: &mut Document, target: NodeId) -> Result<EventResult> {
        let Some(key) = self.nodes().option_at(doc, target) else {
            return Ok(EventResult::Ignored);
        };
        if self.state().option(key).is_none_or(|o| o.disabled) {
            return Ok(EventResult::Ignored);
        }
        // Hover produced by a keyboard-driven scroll
        if self.take_hover_suppression() {
            return Ok(EventResult::Ignored);
        }

        if self.set_current(key) {
            self.render_focus(doc)?;
        }
        Ok(EventResult::Consumed)
    }

    fn on_input(&mut self, doc: &mut Document, target: NodeId, value: &str) -> Result<EventResult> {
        if self.nodes().search != Some(target) {
            return Ok(EventResult::Ignored);
        }
        self.filter(doc, value)?;
        Ok(EventResult::Consumed)
    }
}
