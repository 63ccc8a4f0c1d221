use iir::one_pole::OnePole;
use itertools::izip;
use kpp_component::{
    ProcessingEnvironment,
    audio::{Buffer, BufferMut},
    effect::Effect as EffectT,
    parameters::{ParamId, States},
};

use crate::{CUTOFF, CUTOFF_DISPLAY, DRY, OCTAVE_1, OCTAVE_2};


const ENVELOPE_CUTOFF: f32 = 30.0;

/// Flip-flop octave divider for one channel.
///
/// The input is lowpassed to find the fundamental, and every rising zero
/// crossing toggles the first square wave. Every rising edge of that square
/// toggles the second. Both follow the input's envelope.
#[derive(Debug, Clone)]
struct Divider {
    tracker: OnePole,
    envelope: OnePole,
    last: f32,
    first: f32,
    second: f32,
}

impl Divider {
    fn new(sampling_rate: f32) -> Self {
        Self {
            tracker: OnePole::default(),
            envelope: OnePole::new(ENVELOPE_CUTOFF, sampling_rate),
            last: 0.0,
            first: 1.0,
            second: 1.0,
        }
    }

    fn process(&mut self, x: f32) -> (f32, f32) {
        let tracked = self.tracker.lowpass(x);
        if self.last <= 0.0 && tracked > 0.0 {
            self.first = -self.first;
            if self.first > 0.0 {
                self.second = -self.second;
            }
        }
        self.last = tracked;
        let level = self.envelope.lowpass(x.abs());
        (self.first * level, self.second * level)
    }
}

/// Flip-flop octave divider per channel, mixed with the dry signal.
pub struct Effect {
    sampling_rate: f32,
    channels: [Divider; 2],
    dry: f32,
    octave_1: f32,
    octave_2: f32,
}

fn numeric<P: States>(parameters: &P, id: ParamId, current: f32) -> f32 {
    parameters.get_numeric(id).unwrap_or(current)
}

impl Effect {
    pub fn new(env: &ProcessingEnvironment) -> Self {
        Self {
            sampling_rate: env.sampling_rate,
            channels: [
                Divider::new(env.sampling_rate),
                Divider::new(env.sampling_rate),
            ],
            dry: 1.0,
            octave_1: 0.0,
            octave_2: 0.0,
        }
    }
}

impl EffectT for Effect {
    fn handle_parameters<P: States>(&mut self, parameters: &P) {
        if let Some(cutoff) = parameters.get_numeric(CUTOFF) {
            let hz = CUTOFF_DISPLAY.to_display(cutoff);
            for divider in &mut self.channels {
                divider.tracker.set_cutoff(hz, self.sampling_rate);
            }
        }
        self.dry = numeric(parameters, DRY, self.dry);
        self.octave_1 = numeric(parameters, OCTAVE_1, self.octave_1);
        self.octave_2 = numeric(parameters, OCTAVE_2, self.octave_2);
    }

    fn process<I: Buffer, O: BufferMut>(&mut self, input: &I, output: &mut O) {
        for (channel, divider) in self.channels.iter_mut().enumerate() {
            for (i, o) in izip!(input.channel(channel), output.channel_mut(channel)) {
                let (first, second) = divider.process(*i);
                *o = i * self.dry + first * self.octave_1 + second * self.octave_2;
            }
        }
    }
}
