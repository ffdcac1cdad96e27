//! `OrthoPlanesParameters`: Spiegel der Ebenen-Positionen für die UI.

use crate::app::ortho_planes::OrthoPlanesScene;
use crate::core::Shared;
use glam::Vec3;

/// Passives Tool: hält die zuletzt übernommenen Ebenen-Offsets.
#[derive(Debug)]
pub struct PlaneParameters {
    scene: Shared<OrthoPlanesScene>,
    offsets: Vec3,
}

impl PlaneParameters {
    pub fn new(scene: Shared<OrthoPlanesScene>) -> Self {
        let offsets = scene.borrow().offsets();
        Self { scene, offsets }
    }

    pub fn offsets(&self) -> Vec3 {
        self.offsets
    }

    /// Übernimmt die aktuellen Offsets aus der Szene.
    pub fn update_from_scene(&mut self) {
        self.offsets = self.scene.borrow().offsets();
    }

    /// Schreibt Offsets in die Szene (geklemmt) und übernimmt das Ergebnis.
    pub fn apply_to_scene(&mut self, offsets: Vec3) {
        self.scene.borrow_mut().set_offsets(offsets);
        self.update_from_scene();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ortho_planes::VolumeDimensions;
    use crate::core::shared;

    #[test]
    fn test_apply_reads_back_clamped_offsets() {
        let scene = shared(OrthoPlanesScene::new(VolumeDimensions::new(10.0, 10.0, 10.0)));
        let mut params = PlaneParameters::new(scene.clone());

        params.apply_to_scene(Vec3::new(100.0, 0.0, 0.0));
        assert_eq!(params.offsets(), Vec3::new(5.0, 0.0, 0.0));

        scene.borrow_mut().set_offsets(Vec3::ZERO);
        assert_eq!(params.offsets(), Vec3::new(5.0, 0.0, 0.0), "nur explizit übernommen");
        params.update_from_scene();
        assert_eq!(params.offsets(), Vec3::ZERO);
    }
}
