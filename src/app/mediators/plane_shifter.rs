//! `QuadViewXYZOrthoPlanesShifter`: verschiebt die Ebenen per Rechts-Drag im 3D-Viewport.
//!
//! Solange verschoben wird, sind die Kamera-Controls gesperrt. Aktiv erst,
//! nachdem ein Material gesetzt wurde (liefert die Bounding-Box).

use crate::app::ortho_planes::OrthoPlanesScene;
use crate::app::tools::{CameraControls, PlaneParameters, PlanesMaterialManager};
use crate::core::{Shared, Update};
use crate::render::QuadViewLayout;
use crate::render::ViewAxis;
use crate::ui::{MouseAction, MouseButton};
use glam::Vec3;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Zustand einer laufenden Verschiebung.
#[derive(Debug, Default)]
struct ShiftState {
    ready: bool,
    active: bool,
    start_offsets: Vec3,
    pending: Option<Vec3>,
    shifts: u32,
}

/// Updatable Mediator zwischen Quad-View, Kamera-Controls, Material und Ebenen-Parametern.
pub struct PlaneShifter {
    scene: Shared<OrthoPlanesScene>,
    state: Rc<RefCell<ShiftState>>,
}

impl PlaneShifter {
    /// Verdrahtet Interceptors am 3D-Viewport und den Material-Callback.
    pub fn new(
        layout: &QuadViewLayout,
        camera_controls: &CameraControls,
        material_manager: &mut PlanesMaterialManager,
        plane_params: Shared<PlaneParameters>,
        scene: Shared<OrthoPlanesScene>,
        shift_speed: f32,
    ) -> anyhow::Result<Self> {
        let pane = layout
            .pane(ViewAxis::Perspective)
            .ok_or_else(|| anyhow::anyhow!("Layout hat keinen 3D-Viewport"))?;
        let state = Rc::new(RefCell::new(ShiftState::default()));
        let camera_lock: Rc<Cell<bool>> = camera_controls.lock_handle();

        let ready = state.clone();
        material_manager.on_material_change(move |material, _| {
            log::debug!("PlaneShifter aktiv für Material '{}'", material);
            ready.borrow_mut().ready = true;
        });

        let mut events = pane.events.borrow_mut();

        let shift = state.clone();
        let lock = camera_lock.clone();
        let source = scene.clone();
        events.with_action(MouseAction::MouseDown, move |propagation, enabled, event| {
            let mut shift = shift.borrow_mut();
            if !enabled || !shift.ready || event.button() != Some(MouseButton::Secondary) {
                return Ok(());
            }
            shift.active = true;
            shift.start_offsets = source.borrow().offsets();
            shift.pending = None;
            lock.set(true);
            propagation.stop();
            Ok(())
        });

        let shift = state.clone();
        events.with_action(MouseAction::MouseMove, move |_, enabled, event| {
            let mut shift = shift.borrow_mut();
            if !enabled || !shift.active {
                return Ok(());
            }
            let delta = event.position();
            let offsets = shift.start_offsets + Vec3::new(delta.x, 0.0, -delta.y) * shift_speed;
            shift.pending = Some(offsets);
            Ok(())
        });

        let shift = state.clone();
        let lock = camera_lock;
        let target = scene.clone();
        events.with_action(MouseAction::MouseUp, move |_, _, event| {
            let mut shift = shift.borrow_mut();
            if !shift.active || event.button() != Some(MouseButton::Secondary) {
                return Ok(());
            }
            shift.active = false;
            shift.shifts += 1;
            if let Some(offsets) = shift.pending.take() {
                target.borrow_mut().set_offsets(offsets);
            }
            lock.set(false);
            plane_params.borrow_mut().update_from_scene();
            Ok(())
        });
        drop(events);

        Ok(Self { scene, state })
    }

    /// Gibt `true` zurück, solange ein Rechts-Drag die Ebenen verschiebt.
    pub fn is_shifting(&self) -> bool {
        self.state.borrow().active
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().ready
    }

    /// Anzahl abgeschlossener Verschiebungen.
    pub fn completed_shifts(&self) -> u32 {
        self.state.borrow().shifts
    }
}

impl Update for PlaneShifter {
    /// Übernimmt die während des Drags vorgemerkten Offsets in die Szene.
    fn update(&mut self) -> anyhow::Result<()> {
        let pending = self.state.borrow_mut().pending.take();
        if let Some(offsets) = pending {
            self.scene
                .try_borrow_mut()
                .map_err(|_| anyhow::anyhow!("Szene ist während des Updates ausgeliehen"))?
                .set_offsets(offsets);
        }
        Ok(())
    }
}

impl std::fmt::Debug for PlaneShifter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaneShifter")
            .field("state", &self.state.borrow())
            .finish()
    }
}
