
/// Removes the offset that asymmetric clipping leaves behind.
#[derive(Debug, Clone)]
pub struct DcBlocker {
    state: f32,
    k: f32,
    coeff: f32,
}

const CUTOFF: f32 = 10.0;

impl DcBlocker {
    /// A blocker for audio at `sampling_rate`.
    #[must_use]
    pub fn new(sampling_rate: f32) -> Self {
        // Linear approximation of the prewarp, close enough this far below Nyquist.
        let k = CUTOFF / sampling_rate * std::f32::consts::PI;
        Self {
            state: 0.0,
            k: 2.0 * k,
            coeff: 1.0 / (1.0 + k),
        }
    }

    /// Filter one sample.
    pub fn process(&mut self, input: f32) -> f32 {
        let output = (input - self.state) * self.coeff;
        self.state += self.k * output;
        output
    }
}
