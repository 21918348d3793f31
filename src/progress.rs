//! Progress reporting capability interface.
//!
//! The pipeline fans progress out of N concurrent workers into whatever the
//! embedding application renders with (a multi-slot console UI, a TUI, or
//! nothing). The core only requires that an implementation tolerate
//! concurrent calls; it assumes no ordering between slots and never reads
//! anything back.

/// Receives per-slot status and total-progress updates from the pipeline.
///
/// A *slot* is one worker's reporting channel, indexed `0..N-1` where `N`
/// is the configured concurrency. The pipeline emits one call per status
/// change; implementations must be internally synchronized because all N
/// workers report concurrently.
pub trait ProgressSink: Send + Sync {
    /// A slot's human-readable status changed (e.g. `"ID 12: 1.5 MB / 3 MB"`)
    fn slot_status(&self, slot: usize, status: &str);

    /// A slot's completion fraction changed; `0.0` when the total size is
    /// unknown (indeterminate), otherwise bytes-written / reported-size
    fn slot_progress(&self, slot: usize, fraction: f64);

    /// One work item finished, successfully or not
    fn increment_total(&self);
}

/// Sink that discards all updates; the default for headless embeddings.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpProgressSink;

impl ProgressSink for NoOpProgressSink {
    fn slot_status(&self, _slot: usize, _status: &str) {}

    fn slot_progress(&self, _slot: usize, _fraction: f64) {}

    fn increment_total(&self) {}
}
