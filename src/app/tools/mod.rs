//! Eingebaute Tools des BrainSlicer-Quad-Views.
//!
//! Tools besitzen eigene Funktionalität (Kamera, Ebenen, Material) und
//! bieten Mediatoren Anknüpfungspunkte an.

/// Pan/Zoom aller Quad-View-Kameras.
mod camera_controls;
mod camera_parameters;
mod materials;
mod plane_parameters;

pub use camera_controls::CameraControls;
pub use camera_parameters::CameraParameters;
pub use materials::{MaterialChangeCallback, PlanesMaterialManager};
pub use plane_parameters::PlaneParameters;
