use crate::element::NodeId;

/// Input events delivered by the host to interested widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Key press at document level. The target is the active element.
    Key { key: Key, modifiers: Modifiers },
    /// Pointer pressed anywhere on the page (global listener).
    PointerDown { target: Option<NodeId> },
    /// Click on a node
    Click { target: NodeId },
    /// Pointer entered a node
    Hover { target: NodeId },
    /// Text field value changed by the user
    Input { target: NodeId, value: String },
    /// Named notification fired on a node by page code
    Custom { target: NodeId, name: String },
}

impl UiEvent {
    pub fn key(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::default(),
        }
    }
}

/// Keys a form control reacts to. Everything else arrives as [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Backspace,
    Enter,
    Escape,
    Tab,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Ctrl or alt is held, so the key belongs to a shortcut, not to the control.
    pub fn is_chord(&self) -> bool {
        self.ctrl || self.alt
    }
}

impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode as Code;
        match code {
            Code::Char(c) => Key::Char(c),
            Code::Backspace => Key::Backspace,
            Code::Enter => Key::Enter,
            Code::Esc => Key::Escape,
            Code::Tab => Key::Tab,
            Code::Up => Key::Up,
            Code::Down => Key::Down,
            Code::PageUp => Key::PageUp,
            Code::PageDown => Key::PageDown,
            Code::Home => Key::Home,
            Code::End => Key::End,
            _ => Key::Other,
        }
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(held: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers as Held;
        Self {
            shift: held.contains(Held::SHIFT),
            ctrl: held.contains(Held::CONTROL),
            alt: held.contains(Held::ALT),
        }
    }
}

impl From<crossterm::event::KeyEvent> for UiEvent {
    fn from(event: crossterm::event::KeyEvent) -> Self {
        UiEvent::Key {
            key: event.code.into(),
            modifiers: event.modifiers.into(),
        }
    }
}
