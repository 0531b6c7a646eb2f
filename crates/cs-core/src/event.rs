//! Input event model.
//!
//! Raw host notifications (`RawPointerInput`, `RawKeyInput`) are translated
//! into typed `PointerEvent` / `KeyEvent` records before being dispatched to
//! application hooks. Pointer positions are converted from client space into
//! surface-local space during translation.

use crate::error::{Result, ShellError};
use crate::geometry::Point2D;
use crate::surface::Surface;
use serde::{Deserialize, Serialize};

/// Tag identifying what kind of input produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputEventKind {
    /// Generic pointer event (no specific action).
    #[default]
    Pointer,
    PointerDown,
    PointerUp,
    PointerMove,
    /// Synthesized from a move while a button is held.
    PointerDrag,
    /// Generic keyboard event (no specific action).
    Key,
    KeyDown,
    KeyUp,
    KeyPress,
}

impl InputEventKind {
    pub fn is_pointer(self) -> bool {
        matches!(
            self,
            Self::Pointer
                | Self::PointerDown
                | Self::PointerUp
                | Self::PointerMove
                | Self::PointerDrag
        )
    }

    pub fn is_key(self) -> bool {
        !self.is_pointer()
    }
}

/// Modifier keys held when the event fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub alt: bool,
    pub ctrl: bool,
    pub shift: bool,
}

/// Fields common to every input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputEvent {
    pub kind: InputEventKind,
    #[serde(flatten)]
    pub modifiers: Modifiers,
}

impl InputEvent {
    pub fn new(kind: InputEventKind, modifiers: Modifiers) -> Self {
        Self { kind, modifiers }
    }

    pub fn alt(&self) -> bool {
        self.modifiers.alt
    }

    pub fn ctrl(&self) -> bool {
        self.modifiers.ctrl
    }

    pub fn shift(&self) -> bool {
        self.modifiers.shift
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` code. Auxiliary buttons (back/forward)
    /// have no variant and are reported as `Left`.
    pub fn from_dom_code(code: i16) -> Self {
        match code {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            other => {
                log::debug!("unmapped mouse button {other}, reporting as left");
                Self::Left
            }
        }
    }
}

/// A pointer event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerEvent {
    #[serde(flatten)]
    pub input: InputEvent,
    pub button: MouseButton,
    /// Position relative to the surface's top-left corner.
    pub canvas_position: Point2D,
    /// Position in an application-defined space (e.g. after a view
    /// transform). Translation never fills this in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_position: Option<Point2D>,
}

impl PointerEvent {
    pub fn new(
        kind: InputEventKind,
        button: MouseButton,
        canvas_position: Point2D,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            input: InputEvent::new(kind, modifiers),
            button,
            canvas_position,
            local_position: None,
        }
    }

    pub fn kind(&self) -> InputEventKind {
        self.input.kind
    }

    pub fn with_kind(mut self, kind: InputEventKind) -> Self {
        self.input.kind = kind;
        self
    }

    pub fn with_local_position(mut self, local: Point2D) -> Self {
        self.local_position = Some(local);
        self
    }
}

/// A keyboard event, copied verbatim from the host notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEvent {
    #[serde(flatten)]
    pub input: InputEvent,
    /// Textual key value (`KeyboardEvent.key`), e.g. `"a"`, `"Enter"`.
    pub key: String,
    pub key_code: u32,
    /// True for auto-repeated key-downs.
    pub repeat: bool,
}

impl KeyEvent {
    pub fn kind(&self) -> InputEventKind {
        self.input.kind
    }
}

// ─── Raw host notifications ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Down,
    Up,
    Move,
}

impl PointerAction {
    /// Parse a DOM event type (`"mousedown"`, `"pointermove"`, ...).
    pub fn from_dom_type(ty: &str) -> Option<Self> {
        match ty {
            "mousedown" | "pointerdown" => Some(Self::Down),
            "mouseup" | "pointerup" => Some(Self::Up),
            "mousemove" | "pointermove" => Some(Self::Move),
            _ => None,
        }
    }

    pub fn kind(self) -> InputEventKind {
        match self {
            Self::Down => InputEventKind::PointerDown,
            Self::Up => InputEventKind::PointerUp,
            Self::Move => InputEventKind::PointerMove,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
    Press,
}

impl KeyAction {
    pub fn from_dom_type(ty: &str) -> Option<Self> {
        match ty {
            "keydown" => Some(Self::Down),
            "keyup" => Some(Self::Up),
            "keypress" => Some(Self::Press),
            _ => None,
        }
    }

    pub fn kind(self) -> InputEventKind {
        match self {
            Self::Down => InputEventKind::KeyDown,
            Self::Up => InputEventKind::KeyUp,
            Self::Press => InputEventKind::KeyPress,
        }
    }
}

/// A pointer notification as delivered by the host, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPointerInput {
    pub action: PointerAction,
    pub client_x: f64,
    pub client_y: f64,
    /// DOM button code (0 = left, 1 = middle, 2 = right).
    pub button: i16,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyInput {
    pub action: KeyAction,
    pub key: String,
    pub key_code: u32,
    pub repeat: bool,
    pub modifiers: Modifiers,
}

// ─── Translation ─────────────────────────────────────────────────────────

/// Convert a raw pointer notification into surface-local coordinates.
pub fn translate_pointer(
    surface: Option<&dyn Surface>,
    raw: &RawPointerInput,
) -> Result<PointerEvent> {
    let surface = surface.ok_or(ShellError::MissingSurface)?;
    let rect = surface.bounding_rect();
    let position = Point2D::create(raw.client_x - rect.left, raw.client_y - rect.top);
    if raw.action == PointerAction::Down {
        log::trace!(
            "pointer down at client ({}, {}), surface offset ({}, {})",
            raw.client_x,
            raw.client_y,
            rect.left,
            rect.top
        );
    }
    Ok(PointerEvent::new(
        raw.action.kind(),
        MouseButton::from_dom_code(raw.button),
        position,
        raw.modifiers,
    ))
}

pub fn translate_key(raw: &RawKeyInput) -> KeyEvent {
    KeyEvent {
        input: InputEvent::new(raw.action.kind(), raw.modifiers),
        key: raw.key.clone(),
        key_code: raw.key_code,
        repeat: raw.repeat,
    }
}
