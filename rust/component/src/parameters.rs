//! Code related to the _parameters_ of an effect.
//!
//! An effect has a small number of _parameters_ that can be changed over time,
//! either by the user through the editor or by the host through automation.
//!
//! Each parameter is one of the following types:
//!
//! - Numeric: a continuous value. Internally every numeric parameter is
//!   _normalized_ to `0.0..=1.0`; a [`DisplayTransform`] maps it to the
//!   units shown to the user (hertz, decibels, percent...).
//! - Switch: a value that can be either on or off. Hosts send switches as
//!   normalized values too, anything above one half is "on".
//!
//! Components tell the framework which parameters exist in their
//! [`crate::Component::parameter_infos`] method. The order of that list is
//! significant, since it is the order in which values are persisted.

mod store;


pub use store::{Listener, SetError, Store};

/// The identifier of a parameter.
///
/// Ids are unique within a component and must stay stable across versions,
/// since hosts record automation against them.
pub type ParamId = u32;

macro_rules! info_numeric_doc {
    () => {
        "Information specific to a numeric parameter."
    };
}

macro_rules! info_numeric_default_doc {
    () => {
        "The default normalized value of the parameter.

This value _must_ be within `0.0..=1.0`."
    };
}

macro_rules! info_numeric_display_doc {
    () => {
        "Maps the normalized value to the value shown to the user."
    };
}

macro_rules! info_numeric_units_doc {
    () => {
        "The units of the displayed value.

Here `None` indicates unitless values, while `Some` indicates the
logical units of a parameter, e.g., \"Hz\""
    };
}

macro_rules! info_switch_doc {
    () => {
        "Information specific to a switch parameter."
    };
}

macro_rules! info_switch_default_doc {
    () => {
        "The default value of the parameter."
    };
}

/// A linear mapping between a normalized value and its displayed value.
///
/// `display = normalized * scale + offset`.
///
/// # Examples
///
/// ```
/// # use kpp_component::parameters::DisplayTransform;
/// let hz = DisplayTransform::linear(700.0, 20.0);
/// assert_eq!(hz.to_display(0.0), 20.0);
/// assert_eq!(hz.to_display(1.0), 720.0);
/// assert_eq!(hz.to_normalized(370.0), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayTransform {
    scale: f32,
    offset: f32,
}

impl DisplayTransform {
    /// The displayed value is the normalized value.
    pub const IDENTITY: Self = Self::linear(1.0, 0.0);

    /// `display = normalized * scale + offset`.
    ///
    /// `scale` must be non-zero for the transform to be invertible.
    #[must_use]
    pub const fn linear(scale: f32, offset: f32) -> Self {
        Self { scale, offset }
    }

    /// Convert a normalized value to a display value.
    #[must_use]
    pub fn to_display(&self, normalized: f32) -> f32 {
        normalized * self.scale + self.offset
    }

    /// Convert a display value back to a normalized value, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn to_normalized(&self, display: f32) -> f32 {
        ((display - self.offset) / self.scale).clamp(0.0, 1.0)
    }
}

/// Contains information specific to a certain type of parameter.
///
/// This is a non-owning reference type, pointing to data with lifetime `'a`.
///
/// # Examples
///
/// ```
/// # use kpp_component::parameters::{DisplayTransform, TypeSpecificInfoRef};
/// let numeric_info = TypeSpecificInfoRef::Numeric {
///   default: 0.5,
///   display: DisplayTransform::linear(100.0, 0.0),
///   units: Some("%"),
/// };
///
/// let switch_info = TypeSpecificInfoRef::Switch { default: false };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpecificInfoRef<'a> {
    #[doc = info_numeric_doc!()]
    Numeric {
        #[doc = info_numeric_default_doc!()]
        default: f32,

        #[doc = info_numeric_display_doc!()]
        display: DisplayTransform,

        #[doc = info_numeric_units_doc!()]
        units: Option<&'a str>,
    },

    #[doc = info_switch_doc!()]
    Switch {
        #[doc = info_switch_default_doc!()]
        default: bool,
    },
}

/// Contains information specific to a certain type of parameter.
///
/// This is an owning version of [`TypeSpecificInfoRef`].
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpecificInfo {
    #[doc = info_numeric_doc!()]
    Numeric {
        #[doc = info_numeric_default_doc!()]
        default: f32,

        #[doc = info_numeric_display_doc!()]
        display: DisplayTransform,

        #[doc = info_numeric_units_doc!()]
        units: Option<String>,
    },

    #[doc = info_switch_doc!()]
    Switch {
        #[doc = info_switch_default_doc!()]
        default: bool,
    },
}

impl<'a> From<&'a TypeSpecificInfoRef<'a>> for TypeSpecificInfo {
    fn from(v: &'a TypeSpecificInfoRef<'a>) -> Self {
        match v {
            TypeSpecificInfoRef::Numeric {
                default,
                display,
                units,
            } => TypeSpecificInfo::Numeric {
                default: *default,
                display: *display,
                units: (*units).map(ToString::to_string),
            },
            TypeSpecificInfoRef::Switch { default } => {
                TypeSpecificInfo::Switch { default: *default }
            }
        }
    }
}

/// Metadata about a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flags {
    /// Whether the parameter can be automated.
    ///
    /// If this is `true` (the default), then this parameter will appear
    /// in the host's automation UI. Otherwise, it will not.
    pub automatable: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Flags { automatable: true }
    }
}

/// Information about a parameter.
///
/// This is a non-owning reference type, usually pointing at static data.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoRef<'a> {
    /// The id of the parameter, unique within the component.
    pub id: ParamId,

    /// Human-readable title of the parameter.
    pub title: &'a str,

    /// A short title of the parameter, for hosts with little room.
    pub short_title: &'a str,

    /// Metadata about the parameter
    pub flags: Flags,

    /// Information specific to the type of parameter.
    pub type_specific: TypeSpecificInfoRef<'a>,
}

/// Owning version of [`InfoRef`].
#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    /// The id of the parameter, unique within the component.
    pub id: ParamId,

    /// Human-readable title of the parameter.
    pub title: String,

    /// A short title of the parameter, for hosts with little room.
    pub short_title: String,

    /// Metadata about the parameter
    pub flags: Flags,

    /// Information specific to the type of parameter.
    pub type_specific: TypeSpecificInfo,
}

impl<'a> From<&'a InfoRef<'a>> for Info {
    fn from(v: &'a InfoRef<'a>) -> Self {
        Info {
            id: v.id,
            title: v.title.to_string(),
            short_title: v.short_title.to_string(),
            flags: v.flags.clone(),
            type_specific: (&v.type_specific).into(),
        }
    }
}

impl Info {
    /// The value the parameter takes before anything sets it.
    #[must_use]
    pub fn default_value(&self) -> Value {
        match self.type_specific {
            TypeSpecificInfo::Numeric { default, .. } => Value::Numeric(default),
            TypeSpecificInfo::Switch { default } => Value::Switch(default),
        }
    }

    /// Convert a normalized value of this parameter to its displayed value.
    ///
    /// Switches display as `0.0` or `1.0`.
    #[must_use]
    pub fn to_display(&self, normalized: f32) -> f32 {
        match &self.type_specific {
            TypeSpecificInfo::Numeric { display, .. } => display.to_display(normalized),
            TypeSpecificInfo::Switch { .. } => {
                if convert_switch(normalized) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }

    /// Convert a displayed value of this parameter back to a normalized value.
    #[must_use]
    pub fn to_normalized(&self, display: f32) -> f32 {
        match &self.type_specific {
            TypeSpecificInfo::Numeric { display: t, .. } => t.to_normalized(display),
            TypeSpecificInfo::Switch { .. } => {
                if convert_switch(display) {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}

/// [`InfoRef`] of static data
pub type StaticInfoRef = InfoRef<'static>;

/// Converts a slice of [`InfoRef`]s to a vector of [`Info`]s.
///
/// # Examples
///
/// ```
/// # use kpp_component::parameters::{StaticInfoRef, TypeSpecificInfoRef, Info, to_infos};
/// let infos: Vec<Info> = to_infos(&[
///   StaticInfoRef {
///     id: 0,
///     title: "Bypass",
///     short_title: "Bypass",
///     flags: Default::default(),
///     type_specific: TypeSpecificInfoRef::Switch { default: false },
///   },
/// ]);
/// assert_eq!(infos[0].id, 0);
/// ```
#[must_use]
pub fn to_infos(v: &[InfoRef<'_>]) -> Vec<Info> {
    v.iter().map(Into::into).collect()
}

/// Interpret a normalized host value as a switch state.
///
/// # Examples
///
/// ```
/// # use kpp_component::parameters::convert_switch;
/// assert!(!convert_switch(0.5));
/// assert!(convert_switch(0.51));
/// ```
#[must_use]
pub fn convert_switch(normalized: f32) -> bool {
    normalized > 0.5
}

/// The value of a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// A normalized numeric value.
    Numeric(f32),

    /// A switch value.
    Switch(bool),
}

impl Value {
    /// The value as the host sees it, in `0.0..=1.0`.
    #[must_use]
    pub fn normalized(self) -> f32 {
        match self {
            Value::Numeric(v) => v,
            Value::Switch(true) => 1.0,
            Value::Switch(false) => 0.0,
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Numeric(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Switch(v)
    }
}

/// The values of a set of parameters at one point in time, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    /// `(id, value)` pairs.
    pub values: Vec<(ParamId, Value)>,
}

/// A read-only view of the current parameter values.
///
/// This is passed into [`crate::effect::Effect::handle_parameters`].
///
/// For convenience, we provide [`States::get_numeric`] and [`States::get_switch`],
/// which return the value of the parameter if it is of the correct type,
/// or `None` otherwise.
pub trait States {
    /// Get the current value of a parameter by its id.
    fn get(&self, id: ParamId) -> Option<Value>;

    /// Get the current normalized value of a numeric parameter.
    fn get_numeric(&self, id: ParamId) -> Option<f32> {
        match self.get(id) {
            Some(Value::Numeric(v)) => Some(v),
            _ => None,
        }
    }

    /// Get the current value of a switch parameter.
    fn get_switch(&self, id: ParamId) -> Option<bool> {
        match self.get(id) {
            Some(Value::Switch(v)) => Some(v),
            _ => None,
        }
    }
}

impl States for Snapshot {
    fn get(&self, id: ParamId) -> Option<Value> {
        self.values
            .iter()
            .find_map(|(k, v)| (*k == id).then_some(*v))
    }
}

impl<S: States + ?Sized> States for &S {
    fn get(&self, id: ParamId) -> Option<Value> {
        (**self).get(id)
    }
}
