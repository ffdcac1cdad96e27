//! Capability-Verträge zwischen Engine und externen Komponenten.
//!
//! Die Engine ruft ausschließlich die hier definierten Operationen auf.
//! Alles Weitere an Tools, Mediatoren, Szene und Layout ist für sie opak
//! und wird nur zwischen den Komponenten selbst genutzt.

use super::{Camera2D, RenderGraph};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

/// Geteilter Besitz innerhalb des (single-threaded) Frame-Loops.
///
/// Komponenten halten Handles aufeinander, die Application hält dieselben Handles.
pub type Shared<T> = Rc<RefCell<T>>;

/// Verpackt einen Wert als [`Shared`].
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Ob eine Komponente pro Frame aktualisiert wird.
///
/// Wird einmalig bei der Registrierung festgelegt, nicht pro Frame geprüft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Komponente hat ein Frame-Update
    Updatable,
    /// Komponente wird im Frame-Loop übersprungen
    #[default]
    Passive,
}

/// Frame-Update einer Komponente (Tool, Mediator).
pub trait Update {
    /// Wird einmal pro Frame aufgerufen, solange die Application läuft.
    fn update(&mut self) -> anyhow::Result<()>;
}

/// Render-Graph-Abstraktion (Geometrie + Materialien).
pub trait Scene {
    /// Read-only Sicht auf den Render-Graphen für `Layout::render`.
    fn render_graph(&self) -> &RenderGraph;

    /// Gibt an, ob `update` pro Frame aufgerufen werden soll.
    ///
    /// Szenen, die `update` überschreiben, müssen hier `Updatable` liefern.
    fn update_mode(&self) -> UpdateMode {
        UpdateMode::Passive
    }

    /// Frame-Update der Szene (nach allen Mediatoren und Tools).
    fn update(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Render-Oberfläche mit einem oder mehreren Viewports.
pub trait Layout {
    /// Zeichnet den Render-Graphen der Szene.
    fn render(&mut self, graph: &RenderGraph);
    /// Hängt die Input-Listener des Layouts an.
    fn add_layout_listeners(&mut self);
    /// Entfernt die Input-Listener des Layouts.
    fn remove_layout_listeners(&mut self);
    /// Aktiviert/deaktiviert die Interaktion aller Viewports.
    fn enable_viewports(&mut self, enabled: bool);
    /// Leert die Zeichenfläche.
    fn clear_canvas(&mut self);
    /// Gibt alle Ressourcen frei. Danach ist das Layout unbenutzbar.
    fn dispose(&mut self);
}

/// Ein interaktives Kamera+Fläche-Paar innerhalb eines Layouts.
pub trait Viewport {
    /// Aktueller Pan-Zustand (Kamera-Position in Welt-Koordinaten).
    fn pan(&self) -> Vec2;
    /// Hit-Test: befindet sich der Mauszeiger aktuell über dem Viewport?
    fn mouse_intersects(&self) -> bool;
    /// Normalisierte Mausposition (-1..1, y nach oben) relativ zum Viewport.
    fn mouse_pos_reference(&self) -> Vec2;
    /// Kamera des Viewports (liefert den Zoom für Drag-Skalierung).
    fn camera(&self) -> &Camera2D;
}
