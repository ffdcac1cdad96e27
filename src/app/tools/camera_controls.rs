//! `QuadViewCameraControls`: Pan per Drag und Zoom per Mausrad in allen Viewports.
//!
//! Die Interceptors schreiben nur Zustand; der Zoom wird im Frame-Update
//! angewendet, der Pan direkt während des Drags.

use crate::core::{Shared, Update, Viewport};
use crate::render::{OrthoViewport, QuadViewLayout, ViewAxis};
use crate::shared::EngineOptions;
use crate::ui::MouseAction;
use glam::Vec2;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Kamera-Parameter aus den Optionen.
#[derive(Debug, Clone, Copy)]
struct ControlSettings {
    pan_speed: f32,
    zoom_step: f32,
    zoom_min: f32,
    zoom_max: f32,
}

/// Drag-/Zoom-Zustand eines Viewports.
#[derive(Debug)]
struct PaneControl {
    start_pan: Option<Vec2>,
    pending_zoom: f32,
}

impl Default for PaneControl {
    fn default() -> Self {
        Self {
            start_pan: None,
            pending_zoom: 1.0,
        }
    }
}

struct ControlledPane {
    axis: ViewAxis,
    viewport: Shared<OrthoViewport>,
    control: Rc<RefCell<PaneControl>>,
}

/// Updatable Tool: steuert die Kameras aller Quad-View-Viewports.
pub struct CameraControls {
    panes: Vec<ControlledPane>,
    locked: Rc<Cell<bool>>,
    settings: ControlSettings,
}

impl CameraControls {
    /// Hängt Drag- und Wheel-Interceptors an jeden Viewport des Layouts.
    pub fn new(layout: &QuadViewLayout, options: &EngineOptions) -> Self {
        let settings = ControlSettings {
            pan_speed: options.camera_pan_speed,
            zoom_step: options.camera_scroll_zoom_step,
            zoom_min: options.camera_zoom_min,
            zoom_max: options.camera_zoom_max,
        };
        let locked = Rc::new(Cell::new(false));

        let panes = layout
            .panes()
            .iter()
            .map(|pane| {
                let control = Rc::new(RefCell::new(PaneControl::default()));
                let mut events = pane.events.borrow_mut();

                let viewport = pane.viewport.clone();
                let state = control.clone();
                events.with_action(MouseAction::MouseDown, move |_, enabled, _| {
                    if enabled {
                        state.borrow_mut().start_pan = Some(viewport.borrow().pan());
                    }
                    Ok(())
                });

                let viewport = pane.viewport.clone();
                let state = control.clone();
                let lock = locked.clone();
                events.with_action(MouseAction::MouseMove, move |_, enabled, event| {
                    if !enabled || lock.get() {
                        return Ok(());
                    }
                    let Some(start) = state.borrow().start_pan else {
                        return Ok(());
                    };
                    let delta = event.position();
                    // Bild-y wächst nach unten, Welt-y nach oben
                    let offset = Vec2::new(-delta.x, delta.y) * settings.pan_speed;
                    viewport.borrow_mut().camera_mut().look_at(start + offset);
                    Ok(())
                });

                // Up räumt immer auf, auch bei gesperrtem Viewport
                let state = control.clone();
                events.with_action(MouseAction::MouseUp, move |_, _, _| {
                    state.borrow_mut().start_pan = None;
                    Ok(())
                });

                let state = control.clone();
                let lock = locked.clone();
                events.with_action(MouseAction::MouseWheel, move |_, enabled, event| {
                    if !enabled || lock.get() {
                        return Ok(());
                    }
                    if let Some(delta_y) = event.wheel_delta() {
                        let factor = if delta_y < 0.0 {
                            settings.zoom_step
                        } else {
                            1.0 / settings.zoom_step
                        };
                        state.borrow_mut().pending_zoom *= factor;
                    }
                    Ok(())
                });

                ControlledPane {
                    axis: pane.axis(),
                    viewport: pane.viewport.clone(),
                    control,
                }
            })
            .collect();

        Self {
            panes,
            locked,
            settings,
        }
    }

    /// Sperrt Pan und Zoom (z.B. während ein Mediator den Drag übernimmt).
    pub fn set_locked(&self, locked: bool) {
        self.locked.set(locked);
    }

    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }

    /// Geteilter Sperr-Schalter für Interceptors anderer Komponenten.
    pub fn lock_handle(&self) -> Rc<Cell<bool>> {
        self.locked.clone()
    }

    /// Viewport einer Achse.
    pub fn viewport(&self, axis: ViewAxis) -> Option<&Shared<OrthoViewport>> {
        self.panes
            .iter()
            .find(|pane| pane.axis == axis)
            .map(|pane| &pane.viewport)
    }

    /// Setzt alle Kameras auf Position und Zoom (geklemmt) zurück.
    ///
    /// Laufende Pans und vorgemerkte Zooms werden verworfen.
    pub fn reset_to(&self, position: Vec2, zoom: f32) -> anyhow::Result<()> {
        for pane in &self.panes {
            let mut viewport = pane.viewport.try_borrow_mut().map_err(|_| {
                anyhow::anyhow!("Viewport {} ist während des Resets ausgeliehen", pane.axis.label())
            })?;
            let camera = viewport.camera_mut();
            camera.look_at(position);
            camera.zoom = zoom.clamp(self.settings.zoom_min, self.settings.zoom_max);
            *pane.control.borrow_mut() = PaneControl::default();
        }
        Ok(())
    }
}

impl Update for CameraControls {
    fn update(&mut self) -> anyhow::Result<()> {
        for pane in &self.panes {
            let factor = std::mem::replace(&mut pane.control.borrow_mut().pending_zoom, 1.0);
            if factor == 1.0 {
                continue;
            }
            let mut viewport = pane.viewport.try_borrow_mut().map_err(|_| {
                anyhow::anyhow!("Viewport {} ist während des Updates ausgeliehen", pane.axis.label())
            })?;
            viewport.camera_mut().zoom_by_within(
                factor,
                self.settings.zoom_min,
                self.settings.zoom_max,
            );
        }
        Ok(())
    }
}

impl std::fmt::Debug for CameraControls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraControls")
            .field("panes", &self.panes.len())
            .field("locked", &self.locked.get())
            .field("settings", &self.settings)
            .finish()
    }
}
