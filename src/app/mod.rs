//! Application-Layer: Lifecycle, Frame-Loop, Komposition und eingebaute Komponenten.

mod application;
/// Eingebaute Szene, Layout, Tools, Mediatoren und der BrainSlicer-Descriptor.
pub mod builtin;
mod component;
pub mod composition;
mod frame_loop;
pub mod mediators;
pub mod ortho_planes;
pub mod tools;

pub use application::{Application, Lifecycle};
pub use component::{Component, NamedComponent};
pub use composition::{
    compose, ApplicationDescriptor, CanvasDescriptor, CanvasView, ComponentDescriptor,
    ComponentRegistry, Composition, Dependencies, PageDescriptor,
};
pub use frame_loop::{FrameQueue, RunToken};
pub use ortho_planes::{OrthoPlanesScene, VolumeDimensions};
