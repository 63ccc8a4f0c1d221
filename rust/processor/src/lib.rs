//! The host-facing half of a kpp plug-in.
//!
//! A [`Processor`] wraps any [`kpp_component::Component`] and takes care of
//! everything the individual effects share: applying host automation,
//! negotiating speaker arrangements, routing mono and stereo buses to the
//! engine, bypass, engine lifetime, and persisting parameters. An
//! [`EditController`] is the matching parameter mirror for the editor side.
//!
//! All entry points take `&mut self`, so the host's serialization of calls
//! on one instance is enforced by the borrow checker.

mod arrangement;
mod edit_controller;
mod error;
mod processor;
mod registry;

pub use arrangement::{BusDirection, SpeakerArrangement};
pub use edit_controller::EditController;
pub use error::Error;
pub use processor::{AudioBusBuffers, AudioBusBuffersMut, ProcessData, ProcessSetup, Processor};
pub use registry::{Registry, RegistrationId};
