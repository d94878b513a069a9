use rand::rngs::StdRng;
use rand::Rng;

/// Source of uniform random numbers for jitter, re-targeting and cooldowns.
///
/// The engine only ever asks for a unit sample in `[0, 1)`; everything else is
/// derived from that, so tests can inject a scripted sequence.
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform sample in `[min, max)`.
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_unit()
    }
}

impl RandomSource for StdRng {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        self.gen::<f32>()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    #[inline]
    fn next_unit(&mut self) -> f32 {
        (**self).next_unit()
    }
}
