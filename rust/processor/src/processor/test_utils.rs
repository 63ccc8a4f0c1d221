use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use kpp_component::audio::{Buffer, BufferMut};
use kpp_component::effect::Effect;
use kpp_component::events::ParameterChanges;
use kpp_component::parameters::{
    DisplayTransform, Flags, Info, Listener, ParamId, States, StaticInfoRef, TypeSpecificInfoRef,
    to_infos,
};
use kpp_component::{Component, ProcessingEnvironment};

use super::{AudioBusBuffers, AudioBusBuffersMut, ProcessData, ProcessSetup, Processor};
use crate::error::Error;

pub(crate) const BYPASS_ID: ParamId = 0;
pub(crate) const GAIN_ID: ParamId = 1;

static PARAMETERS: [StaticInfoRef; 2] = [
    StaticInfoRef {
        id: BYPASS_ID,
        title: "Bypass",
        short_title: "Bypass",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Switch { default: false },
    },
    StaticInfoRef {
        id: GAIN_ID,
        title: "Gain",
        short_title: "Gain",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Numeric {
            default: 0.5,
            display: DisplayTransform::linear(2.0, 0.0),
            units: None,
        },
    },
];

pub(crate) fn infos() -> Vec<Info> {
    to_infos(&PARAMETERS)
}

pub(crate) const SETUP: ProcessSetup = ProcessSetup {
    sampling_rate: 48000.0,
    max_samples_per_process_call: 512,
};

#[derive(Debug, Default)]
pub(crate) struct Counters {
    pub created: AtomicUsize,
    pub handled_parameters: AtomicUsize,
    pub processed_blocks: AtomicUsize,
}

/// A gain with one sample of feedback per channel, so output depends on history.
#[derive(Debug, Default, Clone)]
pub(crate) struct FakeComponent {
    pub counters: Arc<Counters>,
}

pub(crate) struct FakeEffect {
    gain: f32,
    memory: [f32; 2],
    counters: Arc<Counters>,
}

impl Effect for FakeEffect {
    fn handle_parameters<P: States>(&mut self, parameters: &P) {
        self.gain = parameters.get_numeric(GAIN_ID).unwrap() * 2.0;
        self.counters
            .handled_parameters
            .fetch_add(1, Ordering::SeqCst);
    }

    fn process<I: Buffer, O: BufferMut>(&mut self, input: &I, output: &mut O) {
        assert_eq!(input.num_channels(), 2);
        for (channel, memory) in self.memory.iter_mut().enumerate() {
            for (i, o) in input
                .channel(channel)
                .iter()
                .zip(output.channel_mut(channel).iter_mut())
            {
                *o = i * self.gain + *memory * 0.5;
                *memory = *o;
            }
        }
        self.counters.processed_blocks.fetch_add(1, Ordering::SeqCst);
    }
}

impl Component for FakeComponent {
    type Processor = FakeEffect;

    fn parameter_infos(&self) -> Vec<Info> {
        infos()
    }

    fn bypass_id(&self) -> ParamId {
        BYPASS_ID
    }

    fn create_processor(&self, environment: &ProcessingEnvironment) -> FakeEffect {
        assert_eq!(environment.sampling_rate, SETUP.sampling_rate);
        self.counters.created.fetch_add(1, Ordering::SeqCst);
        FakeEffect {
            gain: 0.0,
            memory: [0.0; 2],
            counters: self.counters.clone(),
        }
    }
}

pub(crate) fn active_processor() -> (Processor<FakeComponent>, Arc<Counters>) {
    let component = FakeComponent::default();
    let counters = component.counters.clone();
    let mut processor = Processor::new(component);
    processor.setup_processing(SETUP).unwrap();
    processor.set_active(true).unwrap();
    (processor, counters)
}

/// Run one block through `processor` with a single input and output bus.
pub(crate) fn run_block(
    processor: &mut Processor<FakeComponent>,
    changes: Option<&dyn ParameterChanges>,
    input: &[Vec<f32>],
    output: &mut [Vec<f32>],
    num_samples: usize,
) -> Result<(), Error> {
    let input_channels: Vec<&[f32]> = input.iter().map(Vec::as_slice).collect();
    let mut output_channels: Vec<&mut [f32]> = output.iter_mut().map(Vec::as_mut_slice).collect();
    let inputs = [AudioBusBuffers {
        channels: &input_channels,
    }];
    let mut outputs = [AudioBusBuffersMut {
        channels: &mut output_channels,
    }];
    processor.process(&mut ProcessData {
        parameter_changes: changes,
        inputs: &inputs,
        outputs: &mut outputs,
        num_samples,
    })
}

#[derive(Debug, Default)]
pub(crate) struct Recorder(Mutex<Vec<(ParamId, f32)>>);

impl Recorder {
    pub fn take(&self) -> Vec<(ParamId, f32)> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

impl Listener for Recorder {
    fn parameter_changed(&self, id: ParamId, display_value: f32) {
        self.0.lock().unwrap().push((id, display_value));
    }
}
