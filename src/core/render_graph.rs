//! Render-Graph als Übergabevertrag zwischen Szene und Layout.
//!
//! Die Szene baut ihn, das Layout liest ihn pro Frame.

use glam::{Vec2, Vec3};
use indexmap::IndexMap;

/// Eine renderbare Ebene im Volumen-Raum.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderNode {
    /// Mittelpunkt in Welt-Koordinaten (mm)
    pub center: Vec3,
    /// Flächennormale (nicht zwingend normiert)
    pub normal: Vec3,
    /// Kantenlängen der Ebene
    pub size: Vec2,
    /// Linienfarbe (RGBA)
    pub color: [f32; 4],
    /// Sichtbarkeit
    pub visible: bool,
    /// Name des zugewiesenen Materials (z.B. Volumen-Shader)
    pub material: Option<String>,
}

impl RenderNode {
    /// Erstellt eine sichtbare Ebene ohne Material.
    pub fn plane(center: Vec3, normal: Vec3, size: Vec2, color: [f32; 4]) -> Self {
        Self {
            center,
            normal,
            size,
            color,
            visible: true,
            material: None,
        }
    }

    /// Eckpunkte der Ebene (gegen den Uhrzeigersinn).
    pub fn corners(&self) -> [Vec3; 4] {
        let (u, v) = self.normal.normalize_or_zero().any_orthonormal_pair();
        let half_u = u * self.size.x * 0.5;
        let half_v = v * self.size.y * 0.5;
        [
            self.center - half_u - half_v,
            self.center + half_u - half_v,
            self.center + half_u + half_v,
            self.center - half_u + half_v,
        ]
    }
}

/// Benannte Render-Nodes in Einfügereihenfolge.
#[derive(Debug, Clone, Default)]
pub struct RenderGraph {
    nodes: IndexMap<String, RenderNode>,
    revision: u64,
}

impl RenderGraph {
    /// Erstellt einen leeren Render-Graphen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt einen Node ein oder ersetzt ihn. Gibt den alten Node zurück.
    pub fn insert(&mut self, name: impl Into<String>, node: RenderNode) -> Option<RenderNode> {
        self.revision += 1;
        self.nodes.insert(name.into(), node)
    }

    /// Read-only Zugriff auf einen Node.
    pub fn get(&self, name: &str) -> Option<&RenderNode> {
        self.nodes.get(name)
    }

    /// Mutabler Zugriff auf einen Node (erhöht die Revision).
    pub fn get_mut(&mut self, name: &str) -> Option<&mut RenderNode> {
        let node = self.nodes.get_mut(name)?;
        self.revision += 1;
        Some(node)
    }

    /// Sichtbare Nodes in Einfügereihenfolge.
    pub fn visible_nodes(&self) -> impl Iterator<Item = &RenderNode> {
        self.nodes.values().filter(|node| node.visible)
    }

    /// Anzahl der Nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Gibt `true` zurück, wenn keine Nodes vorhanden sind.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Änderungszähler (steigt bei jeder Mutation).
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plane_z() -> RenderNode {
        RenderNode::plane(Vec3::ZERO, Vec3::Z, Vec2::new(2.0, 2.0), [1.0; 4])
    }

    #[test]
    fn test_insert_replaces_and_bumps_revision() {
        let mut graph = RenderGraph::new();
        assert!(graph.is_empty());
        assert!(graph.insert("a", plane_z()).is_none());
        assert!(graph.insert("a", plane_z()).is_some());

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.revision(), 2);
    }

    #[test]
    fn test_get_mut_bumps_revision_only_for_known_nodes() {
        let mut graph = RenderGraph::new();
        graph.insert("a", plane_z());
        assert!(graph.get_mut("missing").is_none());
        assert_eq!(graph.revision(), 1);

        if let Some(node) = graph.get_mut("a") {
            node.visible = false;
        }
        assert_eq!(graph.revision(), 2);
        assert_eq!(graph.get("a").map(|node| node.visible), Some(false));
    }

    #[test]
    fn test_visible_nodes_skips_hidden() {
        let mut graph = RenderGraph::new();
        graph.insert("a", plane_z());
        let mut hidden = plane_z();
        hidden.visible = false;
        graph.insert("b", hidden);
        assert_eq!(graph.visible_nodes().count(), 1);
    }

    #[test]
    fn test_corners_lie_in_plane() {
        let node = RenderNode::plane(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::Z,
            Vec2::new(4.0, 4.0),
            [1.0; 4],
        );
        for corner in node.corners() {
            assert_relative_eq!(corner.z, 5.0, epsilon = 1e-5);
            assert_relative_eq!(corner.truncate().length(), 8.0_f32.sqrt(), epsilon = 1e-4);
        }
    }
}
