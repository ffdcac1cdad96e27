//! 2D-Kamera eines Viewports (Pan + Zoom).

use glam::Vec2;

/// 2D-Kamera mit Pan und Zoom
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Position der Kamera in Welt-Koordinaten (= Pan des Viewports)
    pub position: Vec2,
    /// Zoom-Level (1.0 = normal, 2.0 = doppelt so groß)
    pub zoom: f32,
}

impl Camera2D {
    /// Sichtbare Welt-Halbhöhe bei Zoom 1.0 (Einheiten = Millimeter im Volumen).
    pub const BASE_WORLD_EXTENT: f32 = 128.0;

    /// Erstellt eine neue Kamera
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Zentriert die Kamera auf einen Punkt
    pub fn look_at(&mut self, target: Vec2) {
        self.position = target;
    }

    /// Ändert den Zoom-Level innerhalb konfigurierter Grenzen.
    pub fn zoom_by_within(&mut self, factor: f32, min: f32, max: f32) {
        self.zoom = (self.zoom * factor).clamp(min, max);
    }

    /// Skalierung für Drag-Deltas: `1 / sqrt(zoom)`.
    ///
    /// Bei hohem Zoom bewegt ein Pixel Mausweg die Szene weniger stark.
    pub fn drag_sensitivity(&self) -> f32 {
        1.0 / self.zoom.sqrt()
    }

    /// Konvertiert Welt-Koordinaten zu Screen-Koordinaten.
    /// Berücksichtigt BASE_WORLD_EXTENT, Zoom und Aspekt-Ratio.
    pub fn world_to_screen(&self, world_pos: Vec2, screen_size: Vec2) -> Vec2 {
        let aspect = screen_size.x / screen_size.y;
        let local = world_pos - self.position;
        let ndc = Vec2::new(
            local.x * self.zoom / (Self::BASE_WORLD_EXTENT * aspect),
            local.y * self.zoom / Self::BASE_WORLD_EXTENT,
        );
        (ndc + Vec2::ONE) * 0.5 * screen_size
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_zoom_is_clamped() {
        let mut camera = Camera2D::new();
        camera.zoom_by_within(2.0, 0.5, 4.0);
        assert_relative_eq!(camera.zoom, 2.0);

        camera.zoom_by_within(1000.0, 0.5, 4.0);
        assert_relative_eq!(camera.zoom, 4.0);

        camera.zoom_by_within(0.0001, 0.5, 4.0);
        assert_relative_eq!(camera.zoom, 0.5);
    }

    #[test]
    fn test_drag_sensitivity_is_inverse_sqrt_of_zoom() {
        let mut camera = Camera2D::new();
        assert_relative_eq!(camera.drag_sensitivity(), 1.0);

        camera.zoom = 4.0;
        assert_relative_eq!(camera.drag_sensitivity(), 0.5);

        camera.zoom = 0.25;
        assert_relative_eq!(camera.drag_sensitivity(), 2.0);
    }

    #[test]
    fn test_world_to_screen_centers_camera_position() {
        let mut camera = Camera2D::new();
        camera.look_at(Vec2::new(12.0, -7.0));
        let screen_size = Vec2::new(800.0, 600.0);
        let center = camera.world_to_screen(Vec2::new(12.0, -7.0), screen_size);
        assert_relative_eq!(center.x, 400.0, epsilon = 1e-3);
        assert_relative_eq!(center.y, 300.0, epsilon = 1e-3);
    }

    #[test]
    fn test_world_to_screen_scales_with_zoom() {
        let mut camera = Camera2D::new();
        let screen_size = Vec2::new(600.0, 600.0);
        let edge = Vec2::new(Camera2D::BASE_WORLD_EXTENT, 0.0);
        assert_relative_eq!(camera.world_to_screen(edge, screen_size).x, 600.0, epsilon = 1e-3);

        camera.zoom = 2.0;
        let half = Vec2::new(Camera2D::BASE_WORLD_EXTENT * 0.5, 0.0);
        assert_relative_eq!(camera.world_to_screen(half, screen_size).x, 600.0, epsilon = 1e-3);
    }
}
