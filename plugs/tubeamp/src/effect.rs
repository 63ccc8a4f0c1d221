use iir::{dc_blocker::DcBlocker, one_pole::OnePole};
use itertools::izip;
use kpp_component::{
    ProcessingEnvironment,
    audio::{Buffer, BufferMut},
    effect::Effect as EffectT,
    parameters::{ParamId, States},
};

use crate::{BASS, CABINET, DRIVE, LEVEL, MIDDLE, TONE_DISPLAY, TREBLE, VOLUME};


const BASS_CROSSOVER: f32 = 250.0;
const TREBLE_CROSSOVER: f32 = 2500.0;
const CABINET_CUTOFF: f32 = 4000.0;

// Full drive is this much preamp gain.
const MAX_DRIVE_DB: f32 = 40.0;

// Grid bias of the power stage. Makes clipping asymmetric, as a real tube does.
const BIAS: f32 = 0.2;

fn db_to_gain(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

#[derive(Debug, Clone)]
struct Channel {
    bass: OnePole,
    treble: OnePole,
    dc_blocker: DcBlocker,
    cabinet: OnePole,
}

impl Channel {
    fn new(sampling_rate: f32) -> Self {
        Self {
            bass: OnePole::new(BASS_CROSSOVER, sampling_rate),
            treble: OnePole::new(TREBLE_CROSSOVER, sampling_rate),
            dc_blocker: DcBlocker::new(sampling_rate),
            cabinet: OnePole::new(CABINET_CUTOFF, sampling_rate),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Settings {
    drive: f32,
    bass: f32,
    middle: f32,
    treble: f32,
    volume: f32,
    level: f32,
    cabinet: f32,
}

/// Tone stack into a biased tube stage and speaker cabinet, per channel.
pub struct Effect {
    channels: [Channel; 2],
    settings: Settings,
}

fn tone_gain<P: States>(parameters: &P, id: ParamId, current: f32) -> f32 {
    parameters
        .get_numeric(id)
        .map_or(current, |v| db_to_gain(TONE_DISPLAY.to_display(v)))
}

impl Effect {
    pub fn new(env: &ProcessingEnvironment) -> Self {
        Self {
            channels: [
                Channel::new(env.sampling_rate),
                Channel::new(env.sampling_rate),
            ],
            settings: Settings {
                drive: 1.0,
                bass: 1.0,
                middle: 1.0,
                treble: 1.0,
                volume: 1.0,
                level: 1.0,
                cabinet: 1.0,
            },
        }
    }
}

impl EffectT for Effect {
    fn handle_parameters<P: States>(&mut self, parameters: &P) {
        let s = &mut self.settings;
        if let Some(drive) = parameters.get_numeric(DRIVE) {
            s.drive = db_to_gain(drive * MAX_DRIVE_DB);
        }
        s.bass = tone_gain(parameters, BASS, s.bass);
        s.middle = tone_gain(parameters, MIDDLE, s.middle);
        s.treble = tone_gain(parameters, TREBLE, s.treble);
        if let Some(volume) = parameters.get_numeric(VOLUME) {
            s.volume = volume * 2.0;
        }
        s.level = parameters.get_numeric(LEVEL).unwrap_or(s.level);
        s.cabinet = parameters.get_numeric(CABINET).unwrap_or(s.cabinet);
    }

    fn process<I: Buffer, O: BufferMut>(&mut self, input: &I, output: &mut O) {
        let s = self.settings;
        let offset = BIAS.tanh();
        for (channel, state) in self.channels.iter_mut().enumerate() {
            for (i, o) in izip!(input.channel(channel), output.channel_mut(channel)) {
                let lows = state.bass.lowpass(*i);
                let highs = state.treble.highpass(*i);
                let mids = i - lows - highs;
                let toned = lows * s.bass + mids * s.middle + highs * s.treble;
                let saturated = state
                    .dc_blocker
                    .process((toned * s.drive + BIAS).tanh() - offset);
                let cab = state.cabinet.lowpass(saturated);
                *o = (saturated + (cab - saturated) * s.cabinet) * s.volume * s.level;
            }
        }
    }
}
