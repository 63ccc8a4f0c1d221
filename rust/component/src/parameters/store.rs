use fxhash::FxHashMap;

use super::{Info, ParamId, Snapshot, States, TypeSpecificInfo, Value};

/// Receives parameter changes destined for the user interface.
///
/// Values are always delivered in display units, see [`Info::to_display`].
pub trait Listener: Send + Sync {
    /// Called once for each parameter whose value changed.
    fn parameter_changed(&self, id: ParamId, display_value: f32);
}

/// Why a value was refused by a [`Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetError {
    /// No parameter has this id.
    NotFound,

    /// A switch value was given for a numeric parameter, or the other way around.
    WrongType,

    /// The value is not finite or is outside `0.0..=1.0`.
    InvalidValue,
}

#[derive(Debug, Clone)]
struct Slot {
    info: Info,
    value: Value,
}

/// The current values of a component's parameters.
///
/// Parameters keep the order they were declared in.
#[derive(Debug, Clone)]
pub struct Store {
    slots: Vec<Slot>,
    index: FxHashMap<ParamId, usize>,
}

fn valid_for(info: &Info, value: Value) -> Result<(), SetError> {
    match (&info.type_specific, value) {
        (TypeSpecificInfo::Numeric { .. }, Value::Numeric(v)) => {
            if v.is_finite() && (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(SetError::InvalidValue)
            }
        }
        (TypeSpecificInfo::Switch { .. }, Value::Switch(_)) => Ok(()),
        _ => Err(SetError::WrongType),
    }
}

impl Store {
    /// Create a store holding every parameter at its default.
    ///
    /// # Panics
    ///
    /// Panics if two parameters share an id.
    #[must_use]
    pub fn new(infos: Vec<Info>) -> Self {
        let mut index = FxHashMap::default();
        let slots = infos
            .into_iter()
            .enumerate()
            .map(|(i, info)| {
                assert!(
                    index.insert(info.id, i).is_none(),
                    "Duplicate parameter id {}",
                    info.id
                );
                Slot {
                    value: info.default_value(),
                    info,
                }
            })
            .collect();
        Self { slots, index }
    }

    fn slot(&self, id: ParamId) -> Option<&Slot> {
        self.index.get(&id).map(|i| &self.slots[*i])
    }

    /// Information about the parameter with the given id.
    #[must_use]
    pub fn get_info(&self, id: ParamId) -> Option<&Info> {
        self.slot(id).map(|s| &s.info)
    }

    /// The declared parameters and their current values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Info, Value)> {
        self.slots.iter().map(|s| (&s.info, s.value))
    }

    /// Set a parameter value
    ///
    /// # Errors
    ///
    ///  - Returns `NotFound` if no parameter with the given `id` is in the store.
    ///  - Returns `WrongType` if the parameter does not have a type that matches `value`.
    ///  - Returns `InvalidValue` if a numeric `value` is not finite or outside `0.0..=1.0`.
    pub fn set(&mut self, id: ParamId, value: Value) -> Result<(), SetError> {
        let i = *self.index.get(&id).ok_or(SetError::NotFound)?;
        let slot = &mut self.slots[i];
        valid_for(&slot.info, value)?;
        slot.value = value;
        Ok(())
    }

    /// Set a parameter from a normalized host value.
    ///
    /// Switches accept any finite value and are "on" above one half.
    /// Returns whether the stored value changed.
    ///
    /// # Errors
    ///
    /// Same as [`Self::set`]. Non-finite values are `InvalidValue` for either type.
    pub fn set_normalized(&mut self, id: ParamId, normalized: f32) -> Result<bool, SetError> {
        let i = *self.index.get(&id).ok_or(SetError::NotFound)?;
        if !normalized.is_finite() {
            return Err(SetError::InvalidValue);
        }
        let slot = &mut self.slots[i];
        let value = match slot.info.type_specific {
            TypeSpecificInfo::Numeric { .. } => Value::Numeric(normalized),
            TypeSpecificInfo::Switch { .. } => Value::Switch(super::convert_switch(normalized)),
        };
        valid_for(&slot.info, value)?;
        let changed = slot.value != value;
        slot.value = value;
        Ok(changed)
    }

    /// The current value of a parameter, in display units.
    #[must_use]
    pub fn display_value(&self, id: ParamId) -> Option<f32> {
        self.slot(id)
            .map(|s| s.info.to_display(s.value.normalized()))
    }

    /// Every current value, in declaration order.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            values: self.slots.iter().map(|s| (s.info.id, s.value)).collect(),
        }
    }

    /// Apply every value in `snapshot`, or none of them.
    ///
    /// Parameters absent from the snapshot keep their value.
    ///
    /// # Errors
    ///
    /// Returns the first error [`Self::set`] would have returned. The store
    /// is left untouched in that case.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), SetError> {
        for (id, value) in &snapshot.values {
            let slot = self.slot(*id).ok_or(SetError::NotFound)?;
            valid_for(&slot.info, *value)?;
        }
        for (id, value) in &snapshot.values {
            let i = self.index[id];
            self.slots[i].value = *value;
        }
        Ok(())
    }
}

impl States for Store {
    fn get(&self, id: ParamId) -> Option<Value> {
        self.slot(id).map(|s| s.value)
    }
}
