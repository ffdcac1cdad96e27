//! Drag-Erkennung: Mouse-Down, Mouse-Move und Mouse-Up.

use super::{ActionEvent, DragCapture, MouseAction, MouseButton, PointerEventKind, ViewportEventHandler};
use glam::Vec2;

impl ViewportEventHandler {
    /// Mouse-Down: nur bei Treffer auf den Viewport.
    ///
    /// Merkt sich Position, Taste und Pan, hört ab jetzt auf Move-Events und
    /// verteilt `mouseDownAction(x, y, button)`. `None` bei Fehltreffer.
    pub fn mouse_down(&mut self, pos: Vec2, button: MouseButton) -> Option<bool> {
        let pan = {
            let viewport = self.viewport.borrow();
            if !viewport.mouse_intersects() {
                return None;
            }
            viewport.pan()
        };

        self.mousedown_pos = pos;
        self.mousedown_pan = pan;
        self.drag = Some(DragCapture {
            origin: pos,
            button,
        });
        self.container
            .borrow_mut()
            .add_listener(PointerEventKind::Move);

        Some(self.dispatch(
            MouseAction::MouseDown,
            ActionEvent::Pointer {
                x: pos.x,
                y: pos.y,
                button: Some(button),
            },
        ))
    }

    /// Mouse-Move während eines Drags.
    ///
    /// Das Delta zum Drag-Start wird durch `sqrt(zoom)` geteilt. Ohne
    /// laufenden Drag wird nichts verteilt.
    pub fn mouse_move(&mut self, pos: Vec2) -> Option<bool> {
        let capture = self.drag?;
        let sensitivity = self.viewport.borrow().camera().drag_sensitivity();
        let delta = (pos - capture.origin) * sensitivity;

        Some(self.dispatch(
            MouseAction::MouseMove,
            ActionEvent::Pointer {
                x: delta.x,
                y: delta.y,
                button: Some(capture.button),
            },
        ))
    }

    /// Mouse-Up: beendet den Drag und verteilt `mouseUpAction`.
    ///
    /// Position ist der Drag-Start, Taste die beim Mouse-Down erfasste
    /// (`None`, wenn kein Drag lief).
    pub fn mouse_up(&mut self) -> Option<bool> {
        self.container
            .borrow_mut()
            .remove_listener(PointerEventKind::Move);
        let button = self.drag.take().map(|capture| capture.button);
        let pos = self.mousedown_pos;

        Some(self.dispatch(
            MouseAction::MouseUp,
            ActionEvent::Pointer {
                x: pos.x,
                y: pos.y,
                button,
            },
        ))
    }
}
