//! Utilities only useful for tests

/// Checks if two f32 values `a` and `b` are within `e` of each other.
///
/// # Examples
///
/// ```
/// # use kpp_component::audio::test_utils::samplewise_diff;
/// assert_eq!(samplewise_diff(1.0, 1.01, 0.1), true);
/// assert_eq!(samplewise_diff(1.0, 1.3, 0.1), false);
/// ```
#[must_use]
pub fn samplewise_diff(a: f32, b: f32, e: f32) -> bool {
    (a - b).abs() < e
}

/// Checks if all the values from two iterators of f32 values are within `e` of each other.
///
/// # Examples
///
/// ```
/// # use kpp_component::audio::test_utils::samplewise_diff_iters;
/// assert_eq!(samplewise_diff_iters([1.0, 2.0, 3.0], [1.01, 2.01, 3.01], 0.1), true);
/// assert_eq!(samplewise_diff_iters([1.0, 2.0, 3.0], [1.01, 2.2, 3.01], 0.1), false);
/// ```
pub fn samplewise_diff_iters<I: IntoIterator<Item = f32>, J: IntoIterator<Item = f32>>(
    i: I,
    j: J,
    e: f32,
) -> bool {
    i.into_iter().zip(j).all(|(a, b)| samplewise_diff(a, b, e))
}

/// A deterministic test signal: a decaying sawtooth-ish ramp in `[-1, 1]`.
#[must_use]
pub fn test_signal(num_frames: usize) -> Vec<f32> {
    (0..num_frames)
        .map(|i| {
            let phase = (i % 37) as f32 / 37.0;
            (phase * 2.0 - 1.0) * (1.0 - (i as f32 / (num_frames as f32 + 1.0)) * 0.5)
        })
        .collect()
}
