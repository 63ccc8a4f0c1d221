use std::sync::Arc;

use kpp_component::parameters::{Listener, ParamId};

/// Identifies a listener added to a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegistrationId(u64);

/// The user interfaces currently attached to one plug-in instance.
///
/// Each attached listener receives every parameter change, in display units.
#[derive(Default)]
pub struct Registry {
    next_id: u64,
    entries: Vec<(RegistrationId, Arc<dyn Listener>)>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl Registry {
    /// Attach a listener. It stays attached until [`Self::remove`] is called.
    pub fn add(&mut self, listener: Arc<dyn Listener>) -> RegistrationId {
        let id = RegistrationId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Detach a listener. Returns `false` if it wasn't attached.
    pub fn remove(&mut self, id: RegistrationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Deliver a change to every attached listener.
    pub fn notify(&self, id: ParamId, display_value: f32) {
        for (_, listener) in &self.entries {
            listener.parameter_changed(id, display_value);
        }
    }

    /// The number of attached listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no listener is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
