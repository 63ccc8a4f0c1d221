//! Code shared between the kpp processor and edit controller.
//!
//! This holds the binary state format hosts store in projects and presets.

pub mod io;
pub mod state;
