use rand::Rng;

/// Bernoulli trials on `f32` probabilities, drawn
/// the same way throughout the crate so that runs
/// replay identically under a fixed seed.
pub trait Chance: Rng {
    /// Returns `true` with probability `chance`.
    ///
    /// # Examples
    /// ```
    /// use topoevo::Chance;
    ///
    /// let mut rng = rand::thread_rng();
    /// assert!(!rng.chance(0.0));
    /// assert!(rng.chance(1.0));
    /// ```
    fn chance(&mut self, chance: f32) -> bool {
        self.gen::<f32>() < chance
    }
}

impl<R: Rng + ?Sized> Chance for R {}
