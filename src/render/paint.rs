//! egui-Zeichnung des Quad-Views.

use super::quad_view::{OrthoViewport, QuadViewLayout};
use crate::core::RenderNode;
use glam::Vec2;

const FRAME_COLOR: egui::Color32 = egui::Color32::from_gray(90);
const LABEL_COLOR: egui::Color32 = egui::Color32::from_gray(200);

fn to_pos(v: Vec2) -> egui::Pos2 {
    egui::pos2(v.x, v.y)
}

fn to_color(rgba: [f32; 4], alpha_scale: f32) -> egui::Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        channel(rgba[0]),
        channel(rgba[1]),
        channel(rgba[2]),
        channel(rgba[3] * alpha_scale),
    )
}

impl QuadViewLayout {
    /// Zeichnet Rahmen, Beschriftung und den zuletzt gerenderten Graphen.
    pub fn paint(&self, painter: &egui::Painter) {
        for pane in self.panes() {
            let viewport = pane.viewport.borrow();
            let (min, size) = viewport.rect();
            let rect = egui::Rect::from_min_size(to_pos(min), egui::vec2(size.x, size.y));
            let clipped = painter.with_clip_rect(rect);

            if let Some(frame) = self.last_frame() {
                for node in frame.visible_nodes() {
                    paint_node(&clipped, &viewport, node);
                }
            }

            painter.rect_stroke(
                rect,
                0.0,
                egui::Stroke::new(1.0, FRAME_COLOR),
                egui::StrokeKind::Inside,
            );
            painter.text(
                rect.left_top() + egui::vec2(6.0, 4.0),
                egui::Align2::LEFT_TOP,
                viewport.axis().label(),
                egui::FontId::proportional(13.0),
                LABEL_COLOR,
            );
        }
    }
}

fn paint_node(painter: &egui::Painter, viewport: &OrthoViewport, node: &RenderNode) {
    let points: Vec<egui::Pos2> = node
        .corners()
        .iter()
        .map(|corner| to_pos(viewport.world_to_screen(*corner)))
        .collect();

    let stroke = egui::Stroke::new(1.5, to_color(node.color, 1.0));
    let fill = to_color(node.color, 0.12);
    painter.add(egui::Shape::convex_polygon(points, fill, stroke));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion_clamps_and_scales_alpha() {
        let color = to_color([1.5, 0.0, 0.5, 1.0], 0.5);
        assert_eq!(color, egui::Color32::from_rgba_unmultiplied(255, 0, 128, 128));
    }
}
