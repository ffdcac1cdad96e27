//! Mediatoren: verdrahten Tools, Szene und Layout über Interceptors und Callbacks.

mod controls_reset;
mod plane_shifter;

pub use controls_reset::ControlsReset;
pub use plane_shifter::PlaneShifter;
