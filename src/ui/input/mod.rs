//! Viewport-Input: normalisiert native Pointer-Events zu Domain-Aktionen
//! und verteilt sie über Interceptor-Ketten.
//!
//! Aufgeteilt in:
//! - `actions` — Aktionen, Argumente, Ketten und Dispatch
//! - `pointer` — native Events und Maustasten
//! - `surface` — Listener-Verwaltung der Input-Fläche
//! - `drag` — Mouse-Down/Move/Up mit zoom-kompensiertem Delta
//! - `wheel` — Mausrad mit normalisierter Viewport-Position

mod actions;
mod drag;
mod pointer;
mod surface;
mod wheel;

pub use actions::{handler, ActionEvent, ActionHandler, HandlerChains, MouseAction, Propagation};
pub use pointer::{MouseButton, PointerEvent, PointerEventKind};
pub use surface::{InputSurface, PointerSurface};

use crate::core::{Shared, Viewport};
use glam::Vec2;

/// Zustand eines laufenden Drags (zwischen getroffenem Down und Up).
#[derive(Debug, Clone, Copy)]
struct DragCapture {
    origin: Vec2,
    button: MouseButton,
}

/// Bindet eine Input-Fläche an einen Viewport und verteilt Aktionen.
pub struct ViewportEventHandler {
    viewport: Shared<dyn Viewport>,
    container: Shared<dyn InputSurface>,
    enabled: bool,
    /// Letzte bekannte Drag-Position/-Pan (bleibt nach Mouse-Up stehen)
    mousedown_pos: Vec2,
    mousedown_pan: Vec2,
    drag: Option<DragCapture>,
    chains: HandlerChains,
}

impl ViewportEventHandler {
    /// Meldet Down/Up/Wheel-Listener an und unterdrückt das Kontextmenü.
    pub fn new(viewport: Shared<dyn Viewport>, container: Shared<dyn InputSurface>) -> Self {
        {
            let mut surface = container.borrow_mut();
            surface.add_listener(PointerEventKind::Down);
            surface.add_listener(PointerEventKind::Up);
            surface.add_listener(PointerEventKind::Wheel);
            surface.set_context_menu_suppressed(true);
        }
        let pan = viewport.borrow().pan();

        Self {
            viewport,
            container,
            enabled: true,
            mousedown_pos: Vec2::ZERO,
            mousedown_pan: pan,
            drag: None,
            chains: HandlerChains::new(),
        }
    }

    /// Globaler Schalter für alle verteilten Aktionen.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Gebundener Viewport.
    pub fn viewport(&self) -> &Shared<dyn Viewport> {
        &self.viewport
    }

    // ── Registrierung ───────────────────────────────────────────

    /// Hängt einen Interceptor an die Kette einer Aktion an.
    pub fn with_action<F>(&mut self, action: MouseAction, f: F)
    where
        F: Fn(&mut Propagation, bool, &ActionEvent) -> anyhow::Result<()> + 'static,
    {
        self.chains.register(action, handler(f));
    }

    /// Wie [`Self::with_action`], aber über den Aktionsnamen.
    ///
    /// Unbekannte Namen werden ignoriert. Gibt `true` zurück, wenn registriert wurde.
    pub fn with_action_named<F>(&mut self, name: &str, f: F) -> bool
    where
        F: Fn(&mut Propagation, bool, &ActionEvent) -> anyhow::Result<()> + 'static,
    {
        match name.parse::<MouseAction>() {
            Ok(action) => {
                self.with_action(action, f);
                true
            }
            Err(e) => {
                log::debug!("Interceptor ignoriert: {:#}", e);
                false
            }
        }
    }

    /// Anzahl registrierter Interceptors einer Aktion.
    pub fn handler_count(&self, action: MouseAction) -> usize {
        self.chains.len(action)
    }

    /// Verteilt eine Aktion an ihre Kette. Ergebnis: `enabled && !gestoppt`.
    pub fn dispatch(&self, action: MouseAction, event: ActionEvent) -> bool {
        self.chains.dispatch(action, self.enabled, &event)
    }

    // ── Native Events ───────────────────────────────────────────

    /// Routet ein natives Event, sofern die Fläche auf dessen Typ hört.
    ///
    /// `None` = nicht geroutet oder ohne Dispatch (kein Treffer, kein Drag).
    pub fn handle_event(&mut self, event: &PointerEvent) -> Option<bool> {
        if !self.container.borrow().is_listening(event.kind()) {
            return None;
        }
        match *event {
            PointerEvent::Down { pos, button } => self.mouse_down(pos, button),
            PointerEvent::Move { pos } => self.mouse_move(pos),
            PointerEvent::Up { .. } => self.mouse_up(),
            PointerEvent::Wheel { delta_y } => self.wheel(delta_y),
        }
    }

    /// Läuft gerade ein Drag (Down hat den Viewport getroffen)?
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pixelposition des letzten getroffenen Mouse-Down.
    pub fn drag_origin(&self) -> Vec2 {
        self.mousedown_pos
    }

    /// Viewport-Pan zum Zeitpunkt des letzten getroffenen Mouse-Down.
    pub fn pan_at_drag_start(&self) -> Vec2 {
        self.mousedown_pan
    }

    /// Meldet alle nativen Listener ab und hebt die Kontextmenü-Unterdrückung auf.
    pub fn dispose(&mut self) {
        let mut surface = self.container.borrow_mut();
        for kind in PointerEventKind::ALL {
            surface.remove_listener(kind);
        }
        surface.set_context_menu_suppressed(false);
        self.drag = None;
    }
}

impl std::fmt::Debug for ViewportEventHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportEventHandler")
            .field("enabled", &self.enabled)
            .field("drag", &self.drag)
            .field("chains", &self.chains)
            .finish_non_exhaustive()
    }
}
