use iir::one_pole::OnePole;
use itertools::izip;
use kpp_component::{
    ProcessingEnvironment,
    audio::{Buffer, BufferMut},
    effect::Effect as EffectT,
    parameters::States,
};

use crate::{BASSCUT, BASSCUT_DISPLAY, HUMBUCKERIZE};


// Where the humbucker's extra coil rolls off the top end.
const BODY_CUTOFF: f32 = 2500.0;

// Makes up for the level lost in the rolled-off copy.
const BODY_GAIN: f32 = 1.4;

#[derive(Debug, Clone, Copy)]
struct Voicing {
    bass_cut: OnePole,
    body: OnePole,
}

/// Bass cut and humbucker body blend per channel.
pub struct Effect {
    sampling_rate: f32,
    channels: [Voicing; 2],
    humbuckerize: f32,
}

impl Effect {
    pub fn new(env: &ProcessingEnvironment) -> Self {
        let voicing = Voicing {
            bass_cut: OnePole::new(BASSCUT_DISPLAY.to_display(0.5), env.sampling_rate),
            body: OnePole::new(BODY_CUTOFF, env.sampling_rate),
        };
        Self {
            sampling_rate: env.sampling_rate,
            channels: [voicing; 2],
            humbuckerize: 0.5,
        }
    }
}

impl EffectT for Effect {
    fn handle_parameters<P: States>(&mut self, parameters: &P) {
        if let Some(basscut) = parameters.get_numeric(BASSCUT) {
            let hz = BASSCUT_DISPLAY.to_display(basscut);
            for voicing in &mut self.channels {
                voicing.bass_cut.set_cutoff(hz, self.sampling_rate);
            }
        }
        if let Some(humbuckerize) = parameters.get_numeric(HUMBUCKERIZE) {
            self.humbuckerize = humbuckerize;
        }
    }

    fn process<I: Buffer, O: BufferMut>(&mut self, input: &I, output: &mut O) {
        let mix = self.humbuckerize;
        for (channel, voicing) in self.channels.iter_mut().enumerate() {
            for (i, o) in izip!(input.channel(channel), output.channel_mut(channel)) {
                let trimmed = voicing.bass_cut.highpass(*i);
                let body = voicing.body.lowpass(trimmed) * BODY_GAIN;
                *o = trimmed * (1.0 - mix) + body * mix;
            }
        }
    }
}
