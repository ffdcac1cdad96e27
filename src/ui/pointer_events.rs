//! Übersetzt egui-Eingaben eines Frames in native [`PointerEvent`]s.

use super::input::{MouseButton, PointerEvent};
use glam::Vec2;

const BUTTONS: [egui::PointerButton; 3] = [
    egui::PointerButton::Primary,
    egui::PointerButton::Middle,
    egui::PointerButton::Secondary,
];

/// Sammelt die Pointer-Events des aktuellen Frames.
///
/// Reihenfolge: Move, Down, Up, Wheel. Positionen in Fenster-Pixeln.
pub fn collect_pointer_events(ctx: &egui::Context) -> Vec<PointerEvent> {
    ctx.input(|i| {
        let mut events = Vec::new();
        let Some(latest) = i.pointer.latest_pos() else {
            return events;
        };
        let pos = Vec2::new(latest.x, latest.y);

        if i.pointer.delta() != egui::Vec2::ZERO {
            events.push(PointerEvent::Move { pos });
        }
        for egui_button in BUTTONS {
            let Some(button) = map_button(egui_button) else {
                continue;
            };
            if i.pointer.button_pressed(egui_button) {
                events.push(PointerEvent::Down { pos, button });
            }
            if i.pointer.button_released(egui_button) {
                events.push(PointerEvent::Up { pos, button });
            }
        }

        // egui: positiv = zum Benutzer hin; DOM-Konvention umgekehrt
        let scroll = i.smooth_scroll_delta.y;
        if scroll != 0.0 {
            events.push(PointerEvent::Wheel { delta_y: -scroll });
        }
        events
    })
}

/// egui-Taste → Maustaste. Zusatztasten werden nicht geroutet.
pub fn map_button(button: egui::PointerButton) -> Option<MouseButton> {
    match button {
        egui::PointerButton::Primary => Some(MouseButton::Primary),
        egui::PointerButton::Middle => Some(MouseButton::Middle),
        egui::PointerButton::Secondary => Some(MouseButton::Secondary),
        egui::PointerButton::Extra1 | egui::PointerButton::Extra2 => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_button_uses_dom_codes() {
        assert_eq!(map_button(egui::PointerButton::Primary).map(MouseButton::code), Some(0));
        assert_eq!(map_button(egui::PointerButton::Middle).map(MouseButton::code), Some(1));
        assert_eq!(map_button(egui::PointerButton::Secondary).map(MouseButton::code), Some(2));
        assert_eq!(map_button(egui::PointerButton::Extra1), None);
    }

    #[test]
    fn test_idle_context_yields_no_events() {
        let ctx = egui::Context::default();
        assert!(collect_pointer_events(&ctx).is_empty());
    }
}
