//! `QuadViewControlsReset`: setzt alle Kameras auf die Ausgangsstellung zurück.

use crate::app::tools::{CameraControls, CameraParameters};
use crate::core::{Shared, Update};
use std::cell::Cell;

/// Updatable Mediator zwischen Kamera-Controls und Kamera-Parametern.
///
/// Ein Reset wird angefordert und im nächsten Frame ausgeführt.
pub struct ControlsReset {
    camera_controls: Shared<CameraControls>,
    camera_params: Shared<CameraParameters>,
    requested: Cell<bool>,
    resets: u32,
}

impl ControlsReset {
    pub fn new(
        camera_controls: Shared<CameraControls>,
        camera_params: Shared<CameraParameters>,
    ) -> Self {
        Self {
            camera_controls,
            camera_params,
            requested: Cell::new(false),
            resets: 0,
        }
    }

    /// Fordert einen Reset für den nächsten Frame an.
    pub fn request_reset(&self) {
        self.requested.set(true);
    }

    pub fn is_reset_pending(&self) -> bool {
        self.requested.get()
    }

    /// Anzahl ausgeführter Resets.
    pub fn completed_resets(&self) -> u32 {
        self.resets
    }
}

impl Update for ControlsReset {
    fn update(&mut self) -> anyhow::Result<()> {
        if !self.requested.replace(false) {
            return Ok(());
        }
        let (position, zoom) = {
            let params = self.camera_params.borrow();
            (params.home_position(), params.home_zoom())
        };
        self.camera_controls
            .try_borrow()
            .map_err(|_| anyhow::anyhow!("Kamera-Controls sind während des Resets ausgeliehen"))?
            .reset_to(position, zoom)?;
        self.resets += 1;
        log::debug!("Kameras zurückgesetzt auf {:?} (Zoom {})", position, zoom);
        Ok(())
    }
}

impl std::fmt::Debug for ControlsReset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlsReset")
            .field("requested", &self.requested.get())
            .field("resets", &self.resets)
            .finish_non_exhaustive()
    }
}
