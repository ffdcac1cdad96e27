//! Quad-View-Layout: drei orthogonale Schnittansichten plus Perspektive.

use crate::core::{shared, Camera2D, Layout, RenderGraph, Shared, Viewport};
use crate::ui::{PointerEvent, PointerEventKind, PointerSurface, ViewportEventHandler};
use glam::{Vec2, Vec3};

/// Blickrichtung eines Viewports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewAxis {
    /// Sagittal: Blick entlang X, zeigt (y, z)
    X,
    /// Koronal: Blick entlang Y, zeigt (x, z)
    Y,
    /// Axial: Blick entlang Z, zeigt (x, y)
    Z,
    /// Schräge Parallelprojektion aller drei Achsen
    Perspective,
}

impl ViewAxis {
    /// Reihenfolge im 2×2-Raster (links oben, rechts oben, links unten, rechts unten).
    pub const ALL: [Self; 4] = [Self::X, Self::Y, Self::Z, Self::Perspective];

    /// Projiziert einen Weltpunkt in die 2D-Ebene der Ansicht.
    pub fn project(self, p: Vec3) -> Vec2 {
        match self {
            Self::X => Vec2::new(p.y, p.z),
            Self::Y => Vec2::new(p.x, p.z),
            Self::Z => Vec2::new(p.x, p.y),
            Self::Perspective => Vec2::new(p.x - 0.5 * p.y, p.z - 0.35 * p.y),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::Perspective => "3D",
        }
    }
}

/// Ein Viewport des Quad-Views: Pixel-Rechteck, Mauszustand und Kamera.
#[derive(Debug, Clone)]
pub struct OrthoViewport {
    axis: ViewAxis,
    min: Vec2,
    size: Vec2,
    mouse: Option<Vec2>,
    camera: Camera2D,
}

impl OrthoViewport {
    pub fn new(axis: ViewAxis) -> Self {
        Self {
            axis,
            min: Vec2::ZERO,
            size: Vec2::ONE,
            mouse: None,
            camera: Camera2D::new(),
        }
    }

    pub fn axis(&self) -> ViewAxis {
        self.axis
    }

    /// Linke obere Ecke und Größe in Fenster-Pixeln.
    pub fn rect(&self) -> (Vec2, Vec2) {
        (self.min, self.size)
    }

    pub fn set_rect(&mut self, min: Vec2, size: Vec2) {
        self.min = min;
        self.size = size.max(Vec2::ONE);
    }

    /// Setzt die letzte bekannte Mausposition (`None` = Zeiger außerhalb des Fensters).
    pub fn set_mouse(&mut self, pos: Option<Vec2>) {
        self.mouse = pos;
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        let max = self.min + self.size;
        pos.x >= self.min.x && pos.y >= self.min.y && pos.x < max.x && pos.y < max.y
    }

    pub fn camera_mut(&mut self) -> &mut Camera2D {
        &mut self.camera
    }

    /// Weltpunkt → Fenster-Pixel (Bild-y wächst nach unten).
    pub fn world_to_screen(&self, world: Vec3) -> Vec2 {
        let mut plane = self.axis.project(world);
        plane.y = -plane.y;
        self.min + self.camera.world_to_screen(plane, self.size)
    }
}

impl Viewport for OrthoViewport {
    fn pan(&self) -> Vec2 {
        self.camera.position
    }

    fn mouse_intersects(&self) -> bool {
        self.mouse.is_some_and(|pos| self.contains(pos))
    }

    fn mouse_pos_reference(&self) -> Vec2 {
        let Some(pos) = self.mouse else {
            return Vec2::ZERO;
        };
        let ndc = (pos - self.min) / self.size * 2.0 - Vec2::ONE;
        Vec2::new(ndc.x, -ndc.y)
    }

    fn camera(&self) -> &Camera2D {
        &self.camera
    }
}

/// Viewport samt Input-Fläche und Event-Handler.
#[derive(Clone)]
pub struct ViewportPane {
    pub viewport: Shared<OrthoViewport>,
    pub surface: Shared<PointerSurface>,
    pub events: Shared<ViewportEventHandler>,
}

impl ViewportPane {
    fn new(axis: ViewAxis) -> Self {
        let viewport = shared(OrthoViewport::new(axis));
        let surface = shared(PointerSurface::new());
        let events = shared(ViewportEventHandler::new(
            viewport.clone(),
            surface.clone(),
        ));
        Self {
            viewport,
            surface,
            events,
        }
    }

    pub fn axis(&self) -> ViewAxis {
        self.viewport.borrow().axis()
    }
}

/// `XYZPerspectiveQuadView`: vier Viewports im 2×2-Raster.
pub struct QuadViewLayout {
    panes: Vec<ViewportPane>,
    listening: bool,
    /// Zuletzt gemeldete Zeichenfläche (Ursprung, Größe)
    canvas: Option<(Vec2, Vec2)>,
    frame: Option<RenderGraph>,
    rendered_frames: u64,
    disposed: bool,
}

impl Default for QuadViewLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadViewLayout {
    pub fn new() -> Self {
        Self {
            panes: ViewAxis::ALL.into_iter().map(ViewportPane::new).collect(),
            listening: false,
            canvas: None,
            frame: None,
            rendered_frames: 0,
            disposed: false,
        }
    }

    /// Meldet die Zeichenfläche. Auf die Viewports verteilt wird sie nur,
    /// solange die Layout-Listener aktiv sind, sonst beim nächsten Anmelden.
    pub fn resize(&mut self, origin: Vec2, size: Vec2) {
        self.canvas = Some((origin, size));
        if self.listening {
            self.apply_canvas();
        }
    }

    fn apply_canvas(&self) {
        let Some((origin, size)) = self.canvas else {
            return;
        };
        let half = size * 0.5;
        for (index, pane) in self.panes.iter().enumerate() {
            let cell = Vec2::new((index % 2) as f32, (index / 2) as f32);
            pane.viewport
                .borrow_mut()
                .set_rect(origin + cell * half, half);
        }
    }

    pub fn panes(&self) -> &[ViewportPane] {
        &self.panes
    }

    pub fn pane(&self, axis: ViewAxis) -> Option<&ViewportPane> {
        self.panes.iter().find(|pane| pane.axis() == axis)
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Zuletzt gerenderter Render-Graph (`None` nach `clear_canvas`).
    pub fn last_frame(&self) -> Option<&RenderGraph> {
        self.frame.as_ref()
    }

    pub fn rendered_frames(&self) -> u64 {
        self.rendered_frames
    }

    /// Routet ein natives Event an die Viewports.
    ///
    /// Down/Move/Wheel gehen an alle Panes (Hit-Test bzw. Drag-Zustand
    /// entscheidet dort), Up nur an ziehende Panes und die unter dem Zeiger.
    /// Auch ohne Layout-Listener wird geroutet; gesperrte Viewports verteilen
    /// mit `enabled = false`, damit laufende Drags sauber enden.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        if let Some(pos) = event.position() {
            for pane in &self.panes {
                pane.viewport.borrow_mut().set_mouse(Some(pos));
            }
        }

        for pane in &self.panes {
            if event.kind() == PointerEventKind::Up {
                let dragging = pane.events.borrow().is_dragging();
                let under_pointer = pane.viewport.borrow().mouse_intersects();
                if !dragging && !under_pointer {
                    continue;
                }
            }
            pane.events.borrow_mut().handle_event(event);
        }
    }

    /// Zeiger hat das Fenster verlassen.
    pub fn pointer_left(&mut self) {
        for pane in &self.panes {
            pane.viewport.borrow_mut().set_mouse(None);
        }
    }
}

impl Layout for QuadViewLayout {
    fn render(&mut self, graph: &RenderGraph) {
        if self.disposed {
            return;
        }
        match &mut self.frame {
            Some(frame) => frame.clone_from(graph),
            None => self.frame = Some(graph.clone()),
        }
        self.rendered_frames += 1;
    }

    fn add_layout_listeners(&mut self) {
        self.listening = !self.disposed;
        if self.listening {
            self.apply_canvas();
        }
    }

    fn remove_layout_listeners(&mut self) {
        self.listening = false;
    }

    fn enable_viewports(&mut self, enabled: bool) {
        for pane in &self.panes {
            pane.events.borrow_mut().set_enabled(enabled);
        }
    }

    fn clear_canvas(&mut self) {
        self.frame = None;
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for pane in self.panes.drain(..) {
            pane.events.borrow_mut().dispose();
        }
        self.listening = false;
        self.frame = None;
        self.disposed = true;
        log::debug!("QuadViewLayout freigegeben");
    }
}
