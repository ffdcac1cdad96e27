//! Mausrad-Aktion.

use super::{ActionEvent, MouseAction, ViewportEventHandler};

impl ViewportEventHandler {
    /// Mausrad: nur bei Treffer auf den Viewport.
    ///
    /// Verteilt `mouseWheelAction(delta_y, x, y)` mit der normalisierten
    /// Mausposition des Viewports, nicht den Event-Koordinaten.
    pub fn wheel(&mut self, delta_y: f32) -> Option<bool> {
        let reference = {
            let viewport = self.viewport.borrow();
            if !viewport.mouse_intersects() {
                return None;
            }
            viewport.mouse_pos_reference()
        };

        Some(self.dispatch(
            MouseAction::MouseWheel,
            ActionEvent::Wheel {
                delta_y,
                x: reference.x,
                y: reference.y,
            },
        ))
    }
}
