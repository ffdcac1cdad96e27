//! Input-Fläche (Container), an die ein `ViewportEventHandler` gebunden ist.

use super::PointerEventKind;
use std::collections::HashSet;

/// Native Listener-Verwaltung einer Input-Fläche.
///
/// Ein Backend kann hier echte Listener an- und abmelden; der Handler
/// fragt vor dem Routing über `is_listening` nach.
pub trait InputSurface {
    /// Meldet einen Listener für diesen Event-Typ an (idempotent).
    fn add_listener(&mut self, kind: PointerEventKind);
    /// Meldet den Listener ab (idempotent).
    fn remove_listener(&mut self, kind: PointerEventKind);
    /// Ist aktuell ein Listener für diesen Typ angemeldet?
    fn is_listening(&self, kind: PointerEventKind) -> bool;
    /// Unterdrückt das native Kontextmenü (Rechtsklick wird zur Aktion).
    fn set_context_menu_suppressed(&mut self, suppressed: bool);
}

/// Standard-Fläche: merkt sich angemeldete Listener.
#[derive(Debug, Clone, Default)]
pub struct PointerSurface {
    listeners: HashSet<PointerEventKind>,
    context_menu_suppressed: bool,
}

impl PointerSurface {
    /// Erstellt eine Fläche ohne Listener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl angemeldeter Listener.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn context_menu_suppressed(&self) -> bool {
        self.context_menu_suppressed
    }
}

impl InputSurface for PointerSurface {
    fn add_listener(&mut self, kind: PointerEventKind) {
        self.listeners.insert(kind);
    }

    fn remove_listener(&mut self, kind: PointerEventKind) {
        self.listeners.remove(&kind);
    }

    fn is_listening(&self, kind: PointerEventKind) -> bool {
        self.listeners.contains(&kind)
    }

    fn set_context_menu_suppressed(&mut self, suppressed: bool) {
        self.context_menu_suppressed = suppressed;
    }
}
