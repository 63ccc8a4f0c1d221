//! Speaker arrangements negotiated with the host.

/// A set of speakers, one bit per speaker position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpeakerArrangement(pub u64);

impl SpeakerArrangement {
    /// No speakers.
    pub const EMPTY: Self = Self(0);

    /// A single center speaker.
    pub const MONO: Self = Self(1 << 19);

    /// Left and right speakers.
    pub const STEREO: Self = Self(0b11);

    /// The number of channels in the arrangement.
    ///
    /// # Examples
    ///
    /// ```
    /// # use kpp_processor::SpeakerArrangement;
    /// assert_eq!(SpeakerArrangement::MONO.channel_count(), 1);
    /// assert_eq!(SpeakerArrangement::STEREO.channel_count(), 2);
    /// assert_eq!(SpeakerArrangement(0b111).channel_count(), 3);
    /// ```
    #[must_use]
    pub fn channel_count(self) -> usize {
        self.0.count_ones() as usize
    }
}

/// Whether a bus carries audio into or out of the plug-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusDirection {
    /// Audio from the host.
    Input,

    /// Audio to the host.
    Output,
}

/// Pick the arrangement to use for a host proposal, if we support it.
///
/// We support exactly one input bus and one output bus with the same,
/// non-empty arrangement.
pub(crate) fn negotiate(
    inputs: &[SpeakerArrangement],
    outputs: &[SpeakerArrangement],
) -> Option<SpeakerArrangement> {
    match (inputs, outputs) {
        ([input], [output]) if input == output && input.channel_count() > 0 => Some(*input),
        _ => None,
    }
}
