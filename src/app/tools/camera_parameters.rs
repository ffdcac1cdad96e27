//! `QuadViewCameraParameters`: Ausgangsstellung der Quad-View-Kameras.

use glam::Vec2;

/// Passives Tool: Home-Position und Home-Zoom, auf die zurückgesetzt wird.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraParameters {
    home_position: Vec2,
    home_zoom: f32,
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self {
            home_position: Vec2::ZERO,
            home_zoom: 1.0,
        }
    }
}

impl CameraParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn home_position(&self) -> Vec2 {
        self.home_position
    }

    pub fn home_zoom(&self) -> f32 {
        self.home_zoom
    }

    /// Setzt die Ausgangsstellung. Nicht-positive Zooms werden ignoriert.
    pub fn set_home(&mut self, position: Vec2, zoom: f32) {
        self.home_position = position;
        if zoom > 0.0 {
            self.home_zoom = zoom;
        } else {
            log::warn!("Home-Zoom {} ignoriert", zoom);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_home_rejects_non_positive_zoom() {
        let mut params = CameraParameters::new();
        params.set_home(Vec2::new(3.0, 4.0), 0.0);
        assert_eq!(params.home_position(), Vec2::new(3.0, 4.0));
        assert_eq!(params.home_zoom(), 1.0);

        params.set_home(Vec2::ZERO, 2.0);
        assert_eq!(params.home_zoom(), 2.0);
    }
}
