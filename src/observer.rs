//! Step observer trait for monitoring simulation progress.

/// Trait for observing the passes of a simulation tick.
///
/// Implement this trait to monitor solver progress (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations.
pub trait StepObserver {
    /// Called after the integration pass has written its buffer.
    fn on_integrate(&mut self) {}

    /// Called after each constraint relaxation pass.
    fn on_constraint_iteration(&mut self, _iteration: usize) {}

    /// Called after the finalization pass (velocity derivation, pointer
    /// interaction) has written the tick's result buffer.
    fn on_finalize(&mut self) {}

    /// Called when a simulation tick is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
