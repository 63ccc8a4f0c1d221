//! The editor half of a plug-in.
//!
//! The [`EditController`] mirrors the processor's parameters for the host's
//! generic editor and for any attached user interface. It learns the
//! processor's values through `set_component_state` and host edits through
//! `set_param_normalized`, and it persists its own small state (the amp
//! profile path, for plug-ins that have one).

use std::sync::Arc;

use kpp_component::Component;
use kpp_component::parameters::{Listener, ParamId, SetError, States, Store, Value};
use kpp_core::state::{self, Field, Layout};

use crate::error::Error;
use crate::registry::{Registry, RegistrationId};


/// Parameter mirror and editor state for one plug-in instance.
#[derive(Debug)]
pub struct EditController {
    store: Store,
    component_layout: Layout,
    controller_layout: Layout,
    profile_path: String,
    ui: Registry,
}

impl EditController {
    /// Create a controller with every parameter at its default.
    ///
    /// # Panics
    ///
    /// Panics if the component declares two parameters with the same id.
    #[must_use]
    pub fn new<C: Component>(component: &C) -> Self {
        let infos = component.parameter_infos();
        let component_layout = Layout::for_parameters(&infos);
        let controller_layout = if component.persists_profile_path() {
            Layout::new(vec![Field::Text])
        } else {
            Layout::new(Vec::new())
        };
        Self {
            store: Store::new(infos),
            component_layout,
            controller_layout,
            profile_path: String::new(),
            ui: Registry::default(),
        }
    }

    /// The mirrored parameter values.
    #[must_use]
    pub fn parameters(&self) -> &Store {
        &self.store
    }

    fn notify_all(&self) {
        for (info, value) in self.store.iter() {
            self.ui.notify(info.id, info.to_display(value.normalized()));
        }
    }

    /// Take on the values of state saved by the processor.
    ///
    /// Each attached user interface hears about every parameter once.
    ///
    /// # Errors
    ///
    /// `State` if the bytes can't be read. The mirror keeps its previous values.
    pub fn set_component_state(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if let Err(e) = state::restore(&self.component_layout, bytes, &mut self.store) {
            log::warn!("Could not mirror component state: {e}");
            return Err(e.into());
        }
        self.notify_all();
        Ok(())
    }

    /// The normalized value of a parameter.
    #[must_use]
    pub fn param_normalized(&self, id: ParamId) -> Option<f32> {
        self.store.get(id).map(Value::normalized)
    }

    /// Set a parameter from a normalized value. Returns whether it changed.
    ///
    /// Attached user interfaces hear about changed values.
    ///
    /// # Errors
    ///
    /// See [`Store::set_normalized`].
    pub fn set_param_normalized(&mut self, id: ParamId, value: f32) -> Result<bool, SetError> {
        let changed = self.store.set_normalized(id, value)?;
        if changed && let Some(display) = self.store.display_value(id) {
            self.ui.notify(id, display);
        }
        Ok(changed)
    }

    /// Convert a normalized value to the parameter's display units.
    #[must_use]
    pub fn normalized_to_display(&self, id: ParamId, normalized: f32) -> Option<f32> {
        self.store
            .get_info(id)
            .map(|info| info.to_display(normalized))
    }

    /// Convert a value in display units to a normalized value.
    #[must_use]
    pub fn display_to_normalized(&self, id: ParamId, display: f32) -> Option<f32> {
        self.store
            .get_info(id)
            .map(|info| info.to_normalized(display))
    }

    /// Restore the editor's own state.
    ///
    /// # Errors
    ///
    /// `State` if the bytes can't be read. The previous state is kept.
    pub fn set_state(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let restored = state::deserialize(&self.controller_layout, bytes).inspect_err(|e| {
            log::warn!("Could not restore editor state: {e}");
        })?;
        if let Some(path) = restored.text {
            self.profile_path = path;
        }
        Ok(())
    }

    /// Save the editor's own state.
    #[must_use]
    pub fn get_state(&self) -> Vec<u8> {
        state::serialize(
            &self.controller_layout,
            &self.store,
            Some(self.profile_path.as_str()),
        )
    }

    /// The path of the loaded amp profile, empty if none.
    #[must_use]
    pub fn profile_path(&self) -> &str {
        &self.profile_path
    }

    /// Remember the path of the loaded amp profile.
    pub fn set_profile_path(&mut self, path: impl Into<String>) {
        self.profile_path = path.into();
    }

    /// Attach a user interface.
    pub fn add_ui_listener(&mut self, listener: Arc<dyn Listener>) -> RegistrationId {
        self.ui.add(listener)
    }

    /// Detach a user interface. Returns `false` if it wasn't attached.
    pub fn remove_ui_listener(&mut self, id: RegistrationId) -> bool {
        self.ui.remove(id)
    }
}
