//! Eingebaute Implementierungen und der BrainSlicer-Descriptor.

use super::component::Component;
use super::composition::{ApplicationDescriptor, Composition, ComponentRegistry};
use super::mediators::{ControlsReset, PlaneShifter};
use super::ortho_planes::{OrthoPlanesScene, VolumeDimensions};
use super::tools::{CameraControls, CameraParameters, PlaneParameters, PlanesMaterialManager};
use crate::core::shared;
use crate::render::QuadViewLayout;
use crate::shared::EngineOptions;
use anyhow::Context;

// ── Implementierungsnamen ───────────────────────────────────────────

pub const QUAD_VIEW_LAYOUT: &str = "XYZPerspectiveQuadView";
pub const ORTHO_PLANES_SCENE: &str = "OrthoPlanes";
pub const PLANES_MATERIAL_MANAGER: &str = "PlanesMaterialManager";
pub const ORTHO_PLANES_PARAMETERS: &str = "OrthoPlanesParameters";
pub const QUAD_VIEW_CAMERA_PARAMETERS: &str = "QuadViewCameraParameters";
pub const QUAD_VIEW_CAMERA_CONTROLS: &str = "QuadViewCameraControls";
pub const ORTHO_PLANES_SHIFTER: &str = "QuadViewXYZOrthoPlanesShifter";
pub const QUAD_VIEW_CONTROLS_RESET: &str = "QuadViewControlsReset";

/// Materialname des Standard-Volumens.
pub const DEFAULT_MATERIAL: &str = "mni_icbm152";

const BRAIN_SLICER_DESCRIPTOR: &str = include_str!("../../assets/brain_slicer.json");

/// Der eingebaute BrainSlicer-Descriptor.
pub fn brain_slicer_descriptor() -> anyhow::Result<ApplicationDescriptor> {
    ApplicationDescriptor::from_json_str(BRAIN_SLICER_DESCRIPTOR)
}

/// Registry mit allen eingebauten Szenen, Layouts, Tools und Mediatoren.
pub fn builtin_registry(options: &EngineOptions) -> ComponentRegistry {
    let mut registry = ComponentRegistry::new();

    registry.register_scene(ORTHO_PLANES_SCENE, || {
        Ok(OrthoPlanesScene::new(VolumeDimensions::unit()))
    });
    registry.register_layout(QUAD_VIEW_LAYOUT, || Ok(QuadViewLayout::new()));

    registry.register_tool(PLANES_MATERIAL_MANAGER, |deps| {
        let scene = deps
            .first_view()?
            .scene_as::<OrthoPlanesScene>()
            .context("Canvas hat keine OrthoPlanes-Szene")?;
        Ok(Component::passive(shared(PlanesMaterialManager::new(scene))))
    });

    registry.register_tool(ORTHO_PLANES_PARAMETERS, |deps| {
        let scene = deps
            .first_view()?
            .scene_as::<OrthoPlanesScene>()
            .context("Canvas hat keine OrthoPlanes-Szene")?;
        Ok(Component::passive(shared(PlaneParameters::new(scene))))
    });

    registry.register_tool(QUAD_VIEW_CAMERA_PARAMETERS, |_| {
        Ok(Component::passive(shared(CameraParameters::new())))
    });

    let camera_options = options.clone();
    registry.register_tool(QUAD_VIEW_CAMERA_CONTROLS, move |deps| {
        let layout = deps
            .first_view()?
            .layout_as::<QuadViewLayout>()
            .context("Canvas hat kein Quad-View-Layout")?;
        let controls = CameraControls::new(&layout.borrow(), &camera_options);
        Ok(Component::updatable(shared(controls)))
    });

    let shift_speed = options.plane_shift_speed;
    registry.register_mediator(ORTHO_PLANES_SHIFTER, move |deps| {
        let view = deps.first_view()?;
        let layout = view
            .layout_as::<QuadViewLayout>()
            .context("Canvas hat kein Quad-View-Layout")?;
        let scene = view
            .scene_as::<OrthoPlanesScene>()
            .context("Canvas hat keine OrthoPlanes-Szene")?;
        let camera_controls = deps.find::<CameraControls>()?;
        let material_manager = deps.find::<PlanesMaterialManager>()?;
        let plane_params = deps.find::<PlaneParameters>()?;

        let shifter = PlaneShifter::new(
            &layout.borrow(),
            &camera_controls.borrow(),
            &mut material_manager.borrow_mut(),
            plane_params,
            scene,
            shift_speed,
        )?;
        Ok(Component::updatable(shared(shifter)))
    });

    registry.register_mediator(QUAD_VIEW_CONTROLS_RESET, |deps| {
        let reset = ControlsReset::new(
            deps.find::<CameraControls>()?,
            deps.find::<CameraParameters>()?,
        );
        Ok(Component::updatable(shared(reset)))
    });

    registry
}

/// Setzt das Volumen-Material am ersten `PlanesMaterialManager` der Komposition.
///
/// Gibt `false` zurück, wenn die Komposition keinen Material-Manager enthält.
pub fn apply_volume_material(composition: &Composition, name: &str, dimensions: VolumeDimensions) -> bool {
    let Some(manager) = composition.find::<PlanesMaterialManager>() else {
        return false;
    };
    manager.borrow_mut().set_shader_material(name, dimensions);
    true
}
