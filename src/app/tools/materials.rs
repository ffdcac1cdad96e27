//! `PlanesMaterialManager`: setzt das Ebenen-Material und meldet Änderungen.

use crate::app::ortho_planes::{OrthoPlanesScene, VolumeDimensions};
use crate::core::Shared;

/// Callback bei Materialwechsel: `(material, dimensions)`.
pub type MaterialChangeCallback = Box<dyn Fn(&str, VolumeDimensions)>;

/// Passives Tool; Mediatoren hängen sich per [`Self::on_material_change`] an.
pub struct PlanesMaterialManager {
    scene: Shared<OrthoPlanesScene>,
    material: Option<String>,
    dimensions: Option<VolumeDimensions>,
    callbacks: Vec<MaterialChangeCallback>,
}

impl PlanesMaterialManager {
    pub fn new(scene: Shared<OrthoPlanesScene>) -> Self {
        Self {
            scene,
            material: None,
            dimensions: None,
            callbacks: Vec::new(),
        }
    }

    /// Abmessungen des aktuellen Materials (Einheitswürfel ohne Material).
    pub fn dimensions(&self) -> VolumeDimensions {
        self.dimensions.unwrap_or_else(VolumeDimensions::unit)
    }

    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    /// Setzt das Material der Ebenen und ruft alle Callbacks in Registrierungsreihenfolge.
    pub fn set_shader_material(&mut self, name: &str, dimensions: VolumeDimensions) {
        self.scene.borrow_mut().set_material(name, dimensions);
        self.material = Some(name.to_string());
        self.dimensions = Some(dimensions);
        log::info!(
            "Material '{}' gesetzt ({} × {} × {} mm)",
            name,
            dimensions.x,
            dimensions.y,
            dimensions.z
        );
        for callback in &self.callbacks {
            callback(name, dimensions);
        }
    }

    pub fn on_material_change<F>(&mut self, callback: F)
    where
        F: Fn(&str, VolumeDimensions) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }
}

impl std::fmt::Debug for PlanesMaterialManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanesMaterialManager")
            .field("material", &self.material)
            .field("dimensions", &self.dimensions)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shared;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_material_change_notifies_after_scene_update() {
        let scene = shared(OrthoPlanesScene::new(VolumeDimensions::unit()));
        let mut manager = PlanesMaterialManager::new(scene.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        let observed_scene = scene.clone();
        manager.on_material_change(move |name, dims| {
            let size = observed_scene.borrow().plane_size();
            sink.borrow_mut().push((name.to_string(), dims.x, size));
        });

        assert_eq!(manager.dimensions(), VolumeDimensions::unit());
        manager.set_shader_material("mni", VolumeDimensions::new(3.0, 4.0, 12.0));

        assert_eq!(*seen.borrow(), vec![("mni".to_string(), 3.0, 26.0)]);
        assert_eq!(manager.material(), Some("mni"));
    }
}
