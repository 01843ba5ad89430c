/// A scalar quantity that evolves with simulation time.
///
/// Implementors must be pure: evaluating twice at the same time yields the
/// same value. [`sample`](crate::sample) is generic over this trait, so any
/// time profile can be tabulated next to the built-in models.
pub trait TimeModel {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the quantity at simulation time `time`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is undefined at `time`.
    fn evaluate(&self, time: f64) -> Result<f64, Self::Error>;
}
