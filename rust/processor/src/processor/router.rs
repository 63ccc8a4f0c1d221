//! Resolves the host's buses into the two channels an engine expects.

use kpp_component::audio::{Buffer, BufferMut, ChannelLayout};

/// The input channels for one block.
#[derive(Debug)]
pub(super) enum ChannelSet<'a> {
    Stereo { left: &'a [f32], right: &'a [f32] },

    /// A mono host channel, fed to both engine inputs.
    MonoDuplicated { source: &'a [f32] },
}

/// The output channels for one block.
#[derive(Debug)]
pub(super) enum ChannelSetMut<'a> {
    Stereo {
        left: &'a mut [f32],
        right: &'a mut [f32],
    },

    /// A mono host channel. The engine's right output lands in `scratch`.
    MonoDuplicated {
        target: &'a mut [f32],
        scratch: &'a mut [f32],
    },
}

/// Route the input bus. Returns `None` if the bus is missing channels or
/// any channel is shorter than `num_samples`.
pub(super) fn route_input<'a>(
    channels: &'a [&'a [f32]],
    channel_count: usize,
    num_samples: usize,
) -> Option<ChannelSet<'a>> {
    if channel_count >= 2 {
        Some(ChannelSet::Stereo {
            left: channels.first()?.get(..num_samples)?,
            right: channels.get(1)?.get(..num_samples)?,
        })
    } else {
        Some(ChannelSet::MonoDuplicated {
            source: channels.first()?.get(..num_samples)?,
        })
    }
}

/// Route the output bus, like [`route_input`].
///
/// `scratch` must hold at least `num_samples` samples.
pub(super) fn route_output<'a>(
    channels: &'a mut [&mut [f32]],
    channel_count: usize,
    num_samples: usize,
    scratch: &'a mut [f32],
) -> Option<ChannelSetMut<'a>> {
    if channel_count >= 2 {
        let [left, right, ..] = channels else {
            return None;
        };
        Some(ChannelSetMut::Stereo {
            left: left.get_mut(..num_samples)?,
            right: right.get_mut(..num_samples)?,
        })
    } else {
        Some(ChannelSetMut::MonoDuplicated {
            target: channels.first_mut()?.get_mut(..num_samples)?,
            scratch: scratch.get_mut(..num_samples)?,
        })
    }
}

impl Buffer for ChannelSet<'_> {
    fn channel_layout(&self) -> ChannelLayout {
        ChannelLayout::Stereo
    }

    fn num_frames(&self) -> usize {
        match self {
            ChannelSet::Stereo { left, .. } => left.len(),
            ChannelSet::MonoDuplicated { source } => source.len(),
        }
    }

    fn channel(&self, channel: usize) -> &[f32] {
        match (self, channel) {
            (ChannelSet::Stereo { left, .. }, 0) => &**left,
            (ChannelSet::Stereo { right, .. }, 1) => &**right,
            (ChannelSet::MonoDuplicated { source }, 0 | 1) => &**source,
            _ => panic!("Invalid channel {channel}"),
        }
    }
}

impl Buffer for ChannelSetMut<'_> {
    fn channel_layout(&self) -> ChannelLayout {
        ChannelLayout::Stereo
    }

    fn num_frames(&self) -> usize {
        match self {
            ChannelSetMut::Stereo { left, .. } => left.len(),
            ChannelSetMut::MonoDuplicated { target, .. } => target.len(),
        }
    }

    fn channel(&self, channel: usize) -> &[f32] {
        match (self, channel) {
            (ChannelSetMut::Stereo { left, .. }, 0) => &**left,
            (ChannelSetMut::Stereo { right, .. }, 1) => &**right,
            (ChannelSetMut::MonoDuplicated { target, .. }, 0) => &**target,
            (ChannelSetMut::MonoDuplicated { scratch, .. }, 1) => &**scratch,
            _ => panic!("Invalid channel {channel}"),
        }
    }
}

impl BufferMut for ChannelSetMut<'_> {
    fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        match (self, channel) {
            (ChannelSetMut::Stereo { left, .. }, 0) => &mut **left,
            (ChannelSetMut::Stereo { right, .. }, 1) => &mut **right,
            (ChannelSetMut::MonoDuplicated { target, .. }, 0) => &mut **target,
            (ChannelSetMut::MonoDuplicated { scratch, .. }, 1) => &mut **scratch,
            _ => panic!("Invalid channel {channel}"),
        }
    }
}
