//! A tube amplifier: preamp drive, a three band tone stack, a power stage
//! and a speaker cabinet.
//!
//! The editor also remembers which amp profile file the user loaded.

use kpp_component::parameters::{self, DisplayTransform, Flags, StaticInfoRef, TypeSpecificInfoRef};
use kpp_component::{Component as ComponentT, ProcessingEnvironment};

mod effect;

#[cfg(test)]
mod tests;

/// Passes the input through untouched.
pub const BYPASS: parameters::ParamId = 0;

/// Preamp gain.
pub const DRIVE: parameters::ParamId = 1;

/// Low band of the tone stack.
pub const BASS: parameters::ParamId = 2;

/// Middle band of the tone stack.
pub const MIDDLE: parameters::ParamId = 3;

/// High band of the tone stack.
pub const TREBLE: parameters::ParamId = 4;

/// Power amp gain.
pub const VOLUME: parameters::ParamId = 5;

/// Output level.
pub const LEVEL: parameters::ParamId = 6;

/// How much of the speaker cabinet is heard.
pub const CABINET: parameters::ParamId = 7;

const GAIN_DISPLAY: DisplayTransform = DisplayTransform::linear(100.0, 0.0);
const TONE_DISPLAY: DisplayTransform = DisplayTransform::linear(20.0, -10.0);

const fn gain(id: parameters::ParamId, title: &'static str) -> StaticInfoRef {
    StaticInfoRef {
        id,
        title,
        short_title: title,
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Numeric {
            default: 0.5,
            display: GAIN_DISPLAY,
            units: Some("%"),
        },
    }
}

const fn tone(id: parameters::ParamId, title: &'static str) -> StaticInfoRef {
    StaticInfoRef {
        id,
        title,
        short_title: title,
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Numeric {
            default: 0.5,
            display: TONE_DISPLAY,
            units: Some("dB"),
        },
    }
}

const fn plain(id: parameters::ParamId, title: &'static str) -> StaticInfoRef {
    StaticInfoRef {
        id,
        title,
        short_title: title,
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Numeric {
            default: 1.0,
            display: DisplayTransform::IDENTITY,
            units: None,
        },
    }
}

const PARAMETERS: [StaticInfoRef; 8] = [
    gain(DRIVE, "Drive"),
    tone(BASS, "Bass"),
    tone(MIDDLE, "Middle"),
    tone(TREBLE, "Treble"),
    gain(VOLUME, "Volume"),
    plain(LEVEL, "Level"),
    plain(CABINET, "Cabinet"),
    StaticInfoRef {
        id: BYPASS,
        title: "Bypass",
        short_title: "Bypass",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Switch { default: false },
    },
];

/// The tube amp plug-in.
#[derive(Clone, Debug, Default)]
pub struct Component {}

impl ComponentT for Component {
    type Processor = effect::Effect;

    fn parameter_infos(&self) -> Vec<parameters::Info> {
        parameters::to_infos(&PARAMETERS)
    }

    fn bypass_id(&self) -> parameters::ParamId {
        BYPASS
    }

    fn persists_profile_path(&self) -> bool {
        true
    }

    fn create_processor(&self, env: &ProcessingEnvironment) -> Self::Processor {
        effect::Effect::new(env)
    }
}
