//! Makes a single-coil pickup sound closer to a humbucker: trims the low
//! end, then blends in a darker, fuller copy of the signal.

use kpp_component::parameters::{self, DisplayTransform, Flags, StaticInfoRef, TypeSpecificInfoRef};
use kpp_component::{Component as ComponentT, ProcessingEnvironment};

mod effect;


/// Passes the input through untouched.
pub const BYPASS: parameters::ParamId = 0;

/// Cutoff of the low-cut filter.
pub const BASSCUT: parameters::ParamId = 1;

/// How much of the humbucker voicing is blended in.
pub const HUMBUCKERIZE: parameters::ParamId = 2;

const BASSCUT_DISPLAY: DisplayTransform = DisplayTransform::linear(700.0, 20.0);

const PARAMETERS: [StaticInfoRef; 3] = [
    StaticInfoRef {
        id: BASSCUT,
        title: "Bass cut",
        short_title: "Bass cut",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Numeric {
            default: 0.5,
            display: BASSCUT_DISPLAY,
            units: Some("Hz"),
        },
    },
    StaticInfoRef {
        id: HUMBUCKERIZE,
        title: "Humbuckerize",
        short_title: "Hum",
        flags: Flags { automatable: true },
        type_specific: TypeSpecificInfoRef::Numeric {
            default: 0.5,
            display: DisplayTransform::IDENTITY,
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

/// The single-coil to humbucker voicing plug-in.
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
