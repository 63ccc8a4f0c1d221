//! The binary state format hosts persist in projects and presets.
//!
//! The format is positional: a [`Layout`] lists the fields in order, and each
//! field occupies a fixed slot in a little-endian stream with no header,
//! magic number, or version. Numeric parameters are stored as `f32`, switches
//! as `i32` (`> 0` is on), and text as a length-prefixed string.
//!
//! Because the format is positional, parameters must never be reordered, and
//! new fields may only be appended. Bytes after the last field are ignored.

use kpp_component::parameters::{
    Info, ParamId, SetError, Snapshot, States, Store, TypeSpecificInfo, Value,
};

use crate::io::{self, Reader};


/// Errors from reading persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The stream ended before every field was read.
    #[error("state ended before all fields were read")]
    Truncated,

    /// A numeric field was not finite or outside `0.0..=1.0`.
    #[error("persisted value is out of range")]
    OutOfRange,

    /// A text field had a bad length or was not UTF-8.
    #[error("persisted text is malformed")]
    InvalidText,

    /// The state names a parameter this component doesn't have.
    #[error("persisted state refers to an unknown parameter")]
    UnknownParameter,
}

impl From<SetError> for Error {
    fn from(e: SetError) -> Self {
        match e {
            SetError::NotFound | SetError::WrongType => Error::UnknownParameter,
            SetError::InvalidValue => Error::OutOfRange,
        }
    }
}

/// One slot of a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// A numeric parameter, stored as a 4-byte float.
    Float(ParamId),

    /// A switch parameter, stored as a 4-byte signed integer.
    Flag(ParamId),

    /// A string, stored as an `i32` length (counting a trailing NUL) then the bytes.
    Text,
}

/// The order of fields in a persisted stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    fields: Vec<Field>,
}

impl Layout {
    /// A layout with exactly these fields.
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// The layout of a processor's state: every numeric parameter in
    /// declaration order, then every switch.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kpp_component::parameters::{to_infos, DisplayTransform, StaticInfoRef, TypeSpecificInfoRef};
    /// # use kpp_core::state::{Field, Layout};
    /// let infos = to_infos(&[
    ///     StaticInfoRef {
    ///         id: 0,
    ///         title: "Bypass",
    ///         short_title: "Bypass",
    ///         flags: Default::default(),
    ///         type_specific: TypeSpecificInfoRef::Switch { default: false },
    ///     },
    ///     StaticInfoRef {
    ///         id: 1,
    ///         title: "Gain",
    ///         short_title: "Gain",
    ///         flags: Default::default(),
    ///         type_specific: TypeSpecificInfoRef::Numeric {
    ///             default: 0.5,
    ///             display: DisplayTransform::IDENTITY,
    ///             units: None,
    ///         },
    ///     },
    /// ]);
    /// let layout = Layout::for_parameters(&infos);
    /// assert_eq!(layout.fields(), &[Field::Float(1), Field::Flag(0)]);
    /// assert_eq!(layout.fixed_size(), 8);
    /// ```
    #[must_use]
    pub fn for_parameters(infos: &[Info]) -> Self {
        let numerics = infos.iter().filter_map(|info| match info.type_specific {
            TypeSpecificInfo::Numeric { .. } => Some(Field::Float(info.id)),
            TypeSpecificInfo::Switch { .. } => None,
        });
        let switches = infos.iter().filter_map(|info| match info.type_specific {
            TypeSpecificInfo::Switch { .. } => Some(Field::Flag(info.id)),
            TypeSpecificInfo::Numeric { .. } => None,
        });
        Self::new(numerics.chain(switches).collect())
    }

    /// The fields, in stream order.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The size in bytes of the fixed-width fields. Text adds its length prefix only.
    #[must_use]
    pub fn fixed_size(&self) -> usize {
        self.fields.len() * 4
    }
}

/// Decoded state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct State {
    /// Parameter values in layout order.
    pub params: Snapshot,

    /// The value of the layout's text field, if it has one.
    pub text: Option<String>,
}

/// Write `params` (and `text`, for layouts with a text field) in `layout` order.
///
/// Parameters missing from `params` are written as zero.
#[must_use]
pub fn serialize<S: States + ?Sized>(
    layout: &Layout,
    params: &S,
    text: Option<&str>,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(layout.fixed_size());
    for field in layout.fields() {
        match field {
            Field::Float(id) => {
                io::write_f32(&mut out, params.get(*id).map_or(0.0, Value::normalized));
            }
            Field::Flag(id) => io::write_i32(
                &mut out,
                i32::from(params.get(*id).is_some_and(|v| v.normalized() > 0.5)),
            ),
            Field::Text => io::write_str8(&mut out, text.unwrap_or_default()),
        }
    }
    out
}

/// Read a stream written in `layout` order.
///
/// # Errors
///
///  - `Truncated` if `bytes` ends before the last field.
///  - `OutOfRange` if a float is not finite or outside `0.0..=1.0`.
///  - `InvalidText` if a text field is malformed.
pub fn deserialize(layout: &Layout, bytes: &[u8]) -> Result<State, Error> {
    let mut reader = Reader::new(bytes);
    let mut state = State::default();
    for field in layout.fields() {
        match field {
            Field::Float(id) => {
                let v = reader.read_f32()?;
                if !(v.is_finite() && (0.0..=1.0).contains(&v)) {
                    return Err(Error::OutOfRange);
                }
                state.params.values.push((*id, Value::Numeric(v)));
            }
            Field::Flag(id) => {
                let v = reader.read_i32()?;
                state.params.values.push((*id, Value::Switch(v > 0)));
            }
            Field::Text => state.text = Some(reader.read_str8()?),
        }
    }
    Ok(state)
}

/// Read a stream and apply its parameters to `store`, all or nothing.
///
/// # Errors
///
/// Any error from [`deserialize`], or `UnknownParameter` if the layout names
/// a parameter the store doesn't have. The store is untouched on error.
pub fn restore(layout: &Layout, bytes: &[u8], store: &mut Store) -> Result<State, Error> {
    let state = deserialize(layout, bytes)?;
    store.apply_snapshot(&state.params)?;
    Ok(state)
}
