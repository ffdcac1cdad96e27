//! Native Pointer-Events, wie sie vom Host an eine Input-Fläche geliefert werden.

use glam::Vec2;

/// Maustaste (Zusatztasten werden nicht geroutet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Links
    Primary,
    /// Mitte
    Middle,
    /// Rechts
    Secondary,
}

/// Art eines nativen Events (= Listener-Typ auf der Input-Fläche).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Wheel,
}

impl PointerEventKind {
    /// Alle Listener-Typen.
    pub const ALL: [Self; 4] = [Self::Down, Self::Move, Self::Up, Self::Wheel];
}

/// Natives Pointer-Event in Fenster-Pixeln.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { pos: Vec2, button: MouseButton },
    Move { pos: Vec2 },
    Up { pos: Vec2, button: MouseButton },
    /// Positives `delta_y` = vom Benutzer weg scrollen (DOM-Konvention)
    Wheel { delta_y: f32 },
}

impl PointerEvent {
    pub fn kind(&self) -> PointerEventKind {
        match self {
            Self::Down { .. } => PointerEventKind::Down,
            Self::Move { .. } => PointerEventKind::Move,
            Self::Up { .. } => PointerEventKind::Up,
            Self::Wheel { .. } => PointerEventKind::Wheel,
        }
    }

    /// Zeigerposition, falls das Event eine trägt.
    pub fn position(&self) -> Option<Vec2> {
        match *self {
            Self::Down { pos, .. } | Self::Move { pos } | Self::Up { pos, .. } => Some(pos),
            Self::Wheel { .. } => None,
        }
    }
}
