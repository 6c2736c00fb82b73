//! Trait for sources of independent standard-normal variates.

/// A stream of independent N(0, 1) samples.
///
/// Implement this to drive the simulator from a custom generator, a
/// recorded sequence, or a quasi-random source.
///
/// # Examples
///
/// ```rust
/// use heston_simulation::rng::NormalSource;
///
/// /// Replays a fixed cycle of values.
/// struct Replay {
///     values: Vec<f64>,
///     next: usize,
/// }
///
/// impl NormalSource for Replay {
///     fn next_standard_normal(&mut self) -> f64 {
///         let z = self.values[self.next % self.values.len()];
///         self.next += 1;
///         z
///     }
/// }
///
/// let mut replay = Replay { values: vec![0.5, -0.5], next: 0 };
/// let mut buffer = [0.0; 3];
/// replay.fill_standard_normal(&mut buffer);
/// assert_eq!(buffer, [0.5, -0.5, 0.5]);
/// ```
pub trait NormalSource {
    /// Draw one standard-normal variate.
    fn next_standard_normal(&mut self) -> f64;

    /// Fill `buffer` with standard-normal variates, in order.
    fn fill_standard_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.next_standard_normal();
        }
    }
}

impl<N: NormalSource + ?Sized> NormalSource for &mut N {
    #[inline]
    fn next_standard_normal(&mut self) -> f64 {
        (**self).next_standard_normal()
    }

    #[inline]
    fn fill_standard_normal(&mut self, buffer: &mut [f64]) {
        (**self).fill_standard_normal(buffer)
    }
}
