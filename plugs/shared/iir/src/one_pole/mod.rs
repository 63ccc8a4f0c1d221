//! A one-pole filter in topology-preserving form, which stays stable
//! while its cutoff moves.


/// One-pole lowpass/highpass pair sharing one state.
#[derive(Debug, Clone, Copy, Default)]
pub struct OnePole {
    gain: f32,
    state: f32,
}

impl OnePole {
    /// A filter at `cutoff` hertz.
    #[must_use]
    pub fn new(cutoff: f32, sampling_rate: f32) -> Self {
        let mut ret = Self::default();
        ret.set_cutoff(cutoff, sampling_rate);
        ret
    }

    /// Move the cutoff without clearing the state.
    ///
    /// Cutoffs at or above Nyquist are clamped just below it.
    pub fn set_cutoff(&mut self, cutoff: f32, sampling_rate: f32) {
        let incr = (cutoff / sampling_rate).clamp(0.0, 0.49);
        let g = (std::f32::consts::PI * incr).tan();
        self.gain = g / (1.0 + g);
    }

    /// Advance by one sample and return the lowpass output.
    pub fn lowpass(&mut self, x: f32) -> f32 {
        let v = (x - self.state) * self.gain;
        let low = v + self.state;
        self.state = low + v;
        low
    }

    /// Advance by one sample and return the highpass output.
    pub fn highpass(&mut self, x: f32) -> f32 {
        x - self.lowpass(x)
    }
}
