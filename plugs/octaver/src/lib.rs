//! An analog-style octave divider: one and two octaves below the input,
//! mixed with the dry signal.

use kpp_component::parameters::{self, DisplayTransform, Flags, StaticInfoRef, TypeSpecificInfoRef};
use kpp_component::{Component as ComponentT, ProcessingEnvironment};

mod effect;


/// Passes the input through untouched.
pub const BYPASS: parameters::ParamId = 0;

/// Cutoff of the filter that finds the fundamental to divide.
pub const CUTOFF: parameters::ParamId = 1;

/// Level of the unprocessed signal.
pub const DRY: parameters::ParamId = 2;

/// Level of the signal one octave down.
pub const OCTAVE_1: parameters::ParamId = 3;

/// Level of the signal two octaves down.
pub const OCTAVE_2: parameters::ParamId = 4;

const CUTOFF_DISPLAY: DisplayTransform = DisplayTransform::linear(100.0, 100.0);
const LEVEL_DISPLAY: DisplayTransform = DisplayTransform::linear(30.0, 0.0);

const PARAMETERS: [StaticInfoRef; 5] = [
    StaticInfoRef {
        id: CUTOFF,
        title: "Cutoff",
        short_title: "Cutoff",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Numeric {
            default: 0.6,
            display: CUTOFF_DISPLAY,
            units: Some("Hz"),
        },
    },
    StaticInfoRef {
        id: DRY,
        title: "Dry",
        short_title: "Dry",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Numeric {
            default: 1.0,
            display: LEVEL_DISPLAY,
            units: None,
        },
    },
    StaticInfoRef {
        id: OCTAVE_1,
        title: "Octave 1",
        short_title: "Oct 1",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Numeric {
            default: 0.0,
            display: LEVEL_DISPLAY,
            units: None,
        },
    },
    StaticInfoRef {
        id: OCTAVE_2,
        title: "Octave 2",
        short_title: "Oct 2",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Numeric {
            default: 0.0,
            display: LEVEL_DISPLAY,
            units: None,
        },
    },
    StaticInfoRef {
        id: BYPASS,
        title: "Bypass",
        short_title: "Bypass",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Switch { default: false },
    },
];

/// The octaver plug-in.
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

    fn create_processor(&self, env: &ProcessingEnvironment) -> Self::Processor {
        effect::Effect::new(env)
    }
}
