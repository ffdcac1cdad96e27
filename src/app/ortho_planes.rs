//! `OrthoPlanes`-Szene: drei achsenparallele Schnittebenen durch das Volumen.

use crate::core::{RenderGraph, RenderNode, Scene, UpdateMode};
use glam::{Vec2, Vec3};

/// Ausdehnung des geladenen Volumens in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeDimensions {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl VolumeDimensions {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Einheitswürfel, solange kein Material geladen ist.
    pub fn unit() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    pub fn diagonal(&self) -> f32 {
        self.extents().length()
    }

    pub fn extents(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Halbe Kantenlängen (Bounding-Box um den Ursprung).
    pub fn half_extents(&self) -> Vec3 {
        self.extents() * 0.5
    }
}

impl From<[f32; 3]> for VolumeDimensions {
    fn from(value: [f32; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

/// Node-Namen der drei Ebenen, Index = Achse.
pub const PLANE_NAMES: [&str; 3] = ["plane_x", "plane_y", "plane_z"];

const PLANE_COLORS: [[f32; 4]; 3] = [
    [0.95, 0.30, 0.30, 1.0],
    [0.35, 0.85, 0.35, 1.0],
    [0.35, 0.55, 0.95, 1.0],
];

/// Szene mit je einer Ebene pro Achse.
///
/// Offsets werden sofort geklemmt gespeichert; der Render-Graph wird im
/// nächsten `update` nachgezogen.
#[derive(Debug)]
pub struct OrthoPlanesScene {
    graph: RenderGraph,
    offsets: Vec3,
    half_extents: Vec3,
    plane_size: f32,
    material: Option<String>,
    dirty: bool,
}

impl OrthoPlanesScene {
    pub fn new(dimensions: VolumeDimensions) -> Self {
        let mut scene = Self {
            graph: RenderGraph::new(),
            offsets: Vec3::ZERO,
            half_extents: dimensions.half_extents(),
            plane_size: 2.0 * dimensions.diagonal(),
            material: None,
            dirty: true,
        };
        scene.initialize_planes();
        scene
    }

    /// Aktuelle Ebenen-Positionen (x, y, z).
    pub fn offsets(&self) -> Vec3 {
        self.offsets
    }

    /// Setzt die Ebenen-Positionen, geklemmt auf die Bounding-Box.
    pub fn set_offsets(&mut self, offsets: Vec3) {
        let clamped = offsets.clamp(-self.half_extents, self.half_extents);
        if clamped != self.offsets {
            self.offsets = clamped;
            self.dirty = true;
        }
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Setzt die Bounding-Box um den Ursprung und klemmt die Offsets neu.
    pub fn set_bounding_box(&mut self, half_extents: Vec3) {
        self.half_extents = half_extents.abs();
        let offsets = self.offsets;
        self.set_offsets(offsets);
    }

    pub fn plane_size(&self) -> f32 {
        self.plane_size
    }

    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    /// Weist allen Ebenen ein Material zu und passt Größe und Bounding-Box an.
    pub fn set_material(&mut self, name: &str, dimensions: VolumeDimensions) {
        self.material = Some(name.to_string());
        self.plane_size = 2.0 * dimensions.diagonal();
        self.set_bounding_box(dimensions.half_extents());
        self.initialize_planes();
    }

    /// Baut die drei Ebenen neu auf (Größe, Material, Position).
    fn initialize_planes(&mut self) {
        for (axis, name) in PLANE_NAMES.iter().enumerate() {
            let normal = Vec3::AXES[axis];
            let mut node = RenderNode::plane(
                normal * self.offsets[axis],
                normal,
                Vec2::splat(self.plane_size),
                PLANE_COLORS[axis],
            );
            node.material = self.material.clone();
            self.graph.insert(*name, node);
        }
        self.dirty = false;
    }
}

impl Scene for OrthoPlanesScene {
    fn render_graph(&self) -> &RenderGraph {
        &self.graph
    }

    fn update_mode(&self) -> UpdateMode {
        UpdateMode::Updatable
    }

    fn update(&mut self) -> anyhow::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        for (axis, name) in PLANE_NAMES.iter().enumerate() {
            let node = self
                .graph
                .get_mut(name)
                .ok_or_else(|| anyhow::anyhow!("Ebene '{}' fehlt im Render-Graphen", name))?;
            node.center = Vec3::AXES[axis] * self.offsets[axis];
        }
        self.dirty = false;
        Ok(())
    }
}
