//! Abstractions for processing engines that effect audio.

use crate::audio::{Buffer, BufferMut};
use crate::parameters;

/// A trait for audio effect engines.
///
/// An engine is created on activation with the sample rate already known,
/// and dropped on deactivation. It always sees the canonical two-channel
/// layout: mono hosts are fed identical left and right channels.
pub trait Effect {
    /// Handle parameter changes without processing any audio data.
    ///
    /// Called once right after creation and then whenever the effective
    /// value of any parameter changed. Must not allocate or block.
    fn handle_parameters<P: parameters::States>(&mut self, parameters: &P);

    /// Actually process audio data.
    ///
    /// Must not allocate or block.
    ///
    /// `input` and `output` will be the same length, and never longer than
    /// `environment.max_samples_per_process_call` provided in the call to
    /// `crate::Component::create_processor`.
    ///
    /// `output` will be received in an undetermined state and must
    /// be filled with audio by the engine during this call.
    fn process<I: Buffer, O: BufferMut>(&mut self, input: &I, output: &mut O);
}
