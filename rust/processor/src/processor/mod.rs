//! The audio processor half of a plug-in.
//!
//! The host drives a [`Processor`] through a fixed call sequence:
//!
//! - `setup_processing` and `set_bus_arrangements` while inactive,
//! - `set_active(true)`, which creates a fresh engine,
//! - any number of `process` calls,
//! - `set_active(false)`, which drops the engine.
//!
//! State can be saved and restored at any point in this sequence.

use std::sync::Arc;

use kpp_component::effect::Effect;
use kpp_component::events::ParameterChanges;
use kpp_component::parameters::{Listener, Store};
use kpp_component::{Component, ProcessingEnvironment};
use kpp_core::state::{self, Layout};

use crate::arrangement::{self, BusDirection, SpeakerArrangement};
use crate::error::Error;
use crate::registry::{Registry, RegistrationId};

mod bypass;
mod parameters;
mod router;

#[cfg(test)]
pub(crate) mod test_utils;

#[cfg(test)]
mod tests;

/// Processing settings provided by the host before activation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSetup {
    /// The sample rate of the audio.
    pub sampling_rate: f32,

    /// The most samples the host will pass to one `process` call.
    pub max_samples_per_process_call: usize,
}

/// The channels of one input bus. Each channel holds at least `num_samples` samples.
#[derive(Debug, Clone, Copy)]
pub struct AudioBusBuffers<'a> {
    /// One slice per channel.
    pub channels: &'a [&'a [f32]],
}

/// The channels of one output bus. Each channel holds at least `num_samples` samples.
#[derive(Debug)]
pub struct AudioBusBuffersMut<'a> {
    /// One slice per channel.
    pub channels: &'a mut [&'a mut [f32]],
}

/// Everything the host hands over for one block.
pub struct ProcessData<'a> {
    /// Automation for this block, if any.
    pub parameter_changes: Option<&'a dyn ParameterChanges>,

    /// Input buses.
    pub inputs: &'a [AudioBusBuffers<'a>],

    /// Output buses. Audio is written in place.
    pub outputs: &'a mut [AudioBusBuffersMut<'a>],

    /// The number of samples in this block.
    pub num_samples: usize,
}

struct ActiveProcessContext<P> {
    processor: P,

    // Receives the engine's right output when the host bus is mono.
    scratch: Vec<f32>,
}

enum ProcessContext<P> {
    Inactive,
    Active(ActiveProcessContext<P>),
}

/// Hosts a [`Component`]'s engine.
pub struct Processor<C: Component> {
    component: C,
    store: Store,
    bypass: bypass::Gate,
    layout: Layout,
    setup: Option<ProcessSetup>,
    arrangement: SpeakerArrangement,
    listeners: Registry,
    context: ProcessContext<C::Processor>,
}

impl<C: Component> std::fmt::Debug for Processor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor")
            .field("setup", &self.setup)
            .field("arrangement", &self.arrangement)
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}

impl<C: Component> Processor<C> {
    /// Create an inactive processor with every parameter at its default.
    ///
    /// The initial arrangement is stereo in, stereo out.
    ///
    /// # Panics
    ///
    /// Panics if the component declares two parameters with the same id.
    #[must_use]
    pub fn new(component: C) -> Self {
        let infos = component.parameter_infos();
        let layout = Layout::for_parameters(&infos);
        let bypass = bypass::Gate::new(component.bypass_id());
        Self {
            component,
            store: Store::new(infos),
            bypass,
            layout,
            setup: None,
            arrangement: SpeakerArrangement::STEREO,
            listeners: Registry::default(),
            context: ProcessContext::Inactive,
        }
    }

    /// The current parameter values.
    #[must_use]
    pub fn parameters(&self) -> &Store {
        &self.store
    }

    /// Set the sample rate and maximum block size for the next activation.
    ///
    /// # Errors
    ///
    /// `Active` while processing is active.
    pub fn setup_processing(&mut self, setup: ProcessSetup) -> Result<(), Error> {
        if self.is_active() {
            return Err(Error::Active);
        }
        self.setup = Some(setup);
        Ok(())
    }

    /// Propose one arrangement per bus.
    ///
    /// # Errors
    ///
    ///  - `UnsupportedArrangement` unless there is exactly one input and one
    ///    output bus with the same, non-empty arrangement. The previous
    ///    arrangement is kept.
    ///  - `Active` while processing is active.
    pub fn set_bus_arrangements(
        &mut self,
        inputs: &[SpeakerArrangement],
        outputs: &[SpeakerArrangement],
    ) -> Result<(), Error> {
        if self.is_active() {
            return Err(Error::Active);
        }
        let Some(accepted) = arrangement::negotiate(inputs, outputs) else {
            log::warn!("Rejected speaker arrangement {inputs:?} -> {outputs:?}");
            return Err(Error::UnsupportedArrangement);
        };
        self.arrangement = accepted;
        Ok(())
    }

    /// The arrangement of a bus, or `None` if there is no such bus.
    ///
    /// Inputs and outputs always share one arrangement.
    #[must_use]
    pub fn bus_arrangement(
        &self,
        _direction: BusDirection,
        index: usize,
    ) -> Option<SpeakerArrangement> {
        (index == 0).then_some(self.arrangement)
    }

    /// Whether an engine currently exists.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.context, ProcessContext::Active(_))
    }

    /// Activate or deactivate processing.
    ///
    /// Every activation builds a new engine which immediately receives the
    /// current parameters. Deactivation drops it. Repeating the current
    /// state is a no-op.
    ///
    /// # Errors
    ///
    /// `NotSetUp` when activating before `setup_processing`.
    pub fn set_active(&mut self, active: bool) -> Result<(), Error> {
        match (&self.context, active) {
            (ProcessContext::Active(_), true) | (ProcessContext::Inactive, false) => Ok(()),
            (ProcessContext::Active(_), false) => {
                self.context = ProcessContext::Inactive;
                log::debug!("Deactivated");
                Ok(())
            }
            (ProcessContext::Inactive, true) => {
                let setup = self.setup.ok_or(Error::NotSetUp)?;
                let mut processor = self.component.create_processor(&ProcessingEnvironment {
                    sampling_rate: setup.sampling_rate,
                    max_samples_per_process_call: setup.max_samples_per_process_call,
                });
                processor.handle_parameters(&self.store);
                self.context = ProcessContext::Active(ActiveProcessContext {
                    processor,
                    scratch: vec![0.0; setup.max_samples_per_process_call],
                });
                log::debug!(
                    "Activated at {} Hz, up to {} samples per block",
                    setup.sampling_rate,
                    setup.max_samples_per_process_call
                );
                Ok(())
            }
        }
    }

    /// Process one block.
    ///
    /// Automation is applied first, with the last point of each parameter
    /// taking effect for the whole block. Blocks without buses or samples,
    /// and blocks whose buses don't carry enough audio, only apply
    /// automation.
    ///
    /// # Errors
    ///
    ///  - `NotActive` if called while inactive.
    ///  - `BlockTooLarge` if `num_samples` exceeds the negotiated maximum.
    pub fn process(&mut self, data: &mut ProcessData<'_>) -> Result<(), Error> {
        let ProcessContext::Active(context) = &mut self.context else {
            return Err(Error::NotActive);
        };

        if let Some(changes) = data.parameter_changes {
            if parameters::apply_changes(changes, &mut self.store, &self.listeners) {
                context.processor.handle_parameters(&self.store);
            }
        }

        let num_samples = data.num_samples;
        let (Some(input_bus), Some(output_bus)) = (data.inputs.first(), data.outputs.first_mut())
        else {
            return Ok(());
        };
        if num_samples == 0 {
            return Ok(());
        }
        if num_samples > context.scratch.len() {
            return Err(Error::BlockTooLarge(num_samples));
        }

        let channel_count = self.arrangement.channel_count();
        let Some(input) = router::route_input(input_bus.channels, channel_count, num_samples)
        else {
            return Ok(());
        };
        let Some(mut output) = router::route_output(
            output_bus.channels,
            channel_count,
            num_samples,
            &mut context.scratch,
        ) else {
            return Ok(());
        };

        if self.bypass.is_engaged(&self.store) {
            bypass::Gate::copy(&input, &mut output);
        } else {
            context.processor.process(&input, &mut output);
        }
        Ok(())
    }

    /// Save every parameter in the persisted format.
    #[must_use]
    pub fn get_state(&self) -> Vec<u8> {
        state::serialize(&self.layout, &self.store, None)
    }

    /// Restore parameters saved by [`Self::get_state`].
    ///
    /// Either every value is applied or none is. Attached listeners hear
    /// about every parameter, and an active engine is told the new values.
    ///
    /// # Errors
    ///
    /// `State` if the bytes can't be read. Parameters keep their previous values.
    pub fn set_state(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if let Err(e) = state::restore(&self.layout, bytes, &mut self.store) {
            log::warn!("Could not restore state: {e}");
            return Err(e.into());
        }
        for (info, value) in self.store.iter() {
            self.listeners
                .notify(info.id, info.to_display(value.normalized()));
        }
        if let ProcessContext::Active(context) = &mut self.context {
            context.processor.handle_parameters(&self.store);
        }
        Ok(())
    }

    /// Attach a user interface. It receives every parameter change in display units.
    pub fn attach_listener(&mut self, listener: Arc<dyn Listener>) -> RegistrationId {
        self.listeners.add(listener)
    }

    /// Detach a user interface. Returns `false` if it wasn't attached.
    pub fn detach_listener(&mut self, id: RegistrationId) -> bool {
        self.listeners.remove(id)
    }
}
