//! Core abstractions shared by the kpp effect plug-ins.
//!
//! A plug-in is described by a [`Component`]: a static table of parameters and
//! a way to build the [`effect::Effect`] that actually transforms audio once the
//! sample rate is known. Everything host-facing (automation, channel routing,
//! bypass, persistence) lives in `kpp_processor` and is shared by every
//! plug-in in the family.

pub mod audio;
pub mod effect;
pub mod events;
pub mod parameters;

/// Information about the processing environment that the effect will run in.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingEnvironment {
    /// The sample rate of the audio.
    pub sampling_rate: f32,

    /// The maximum number of samples that will be passed to each call to `process`.
    ///
    /// Note that fewer samples may be passed to `process` than this.
    pub max_samples_per_process_call: usize,
}

/// The main plug-in abstraction.
///
/// [`Component`]s contain information about the parameters of an effect
/// as well as the ability to create the effect's processing engine.
///
/// A plug-in should only have one `Component` that represents the whole plug-in.
pub trait Component {
    /// The processing engine that this component creates.
    type Processor: effect::Effect;

    /// Get information about the parameters of this component.
    ///
    /// This must return the same value every time it is called, and the
    /// order is significant: it is the order parameters are persisted in.
    fn parameter_infos(&self) -> Vec<parameters::Info>;

    /// The id of the switch parameter that bypasses the effect.
    fn bypass_id(&self) -> parameters::ParamId;

    /// Whether the editor keeps a path to a profile file in its own state.
    fn persists_profile_path(&self) -> bool {
        false
    }

    /// Create the engine that will actually process audio.
    ///
    /// Note any state needed to process audio should be allocated here.
    /// This is called every time the plug-in is activated, so the returned
    /// engine must not share any state with previous engines.
    fn create_processor(&self, environment: &ProcessingEnvironment) -> Self::Processor;
}
