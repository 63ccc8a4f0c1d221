use kpp_component::audio::{Buffer, BufferMut};
use kpp_component::parameters::{ParamId, States};

/// Passes audio through untouched while the bypass switch is on.
#[derive(Debug, Clone, Copy)]
pub(super) struct Gate {
    id: ParamId,
}

impl Gate {
    pub(super) fn new(id: ParamId) -> Self {
        Self { id }
    }

    pub(super) fn is_engaged<S: States>(&self, parameters: &S) -> bool {
        parameters.get_switch(self.id).unwrap_or(false)
    }

    /// Copy every input channel to the matching output channel.
    pub(super) fn copy<I: Buffer, O: BufferMut>(input: &I, output: &mut O) {
        for channel in 0..output.num_channels() {
            output
                .channel_mut(channel)
                .copy_from_slice(input.channel(channel));
        }
    }
}
