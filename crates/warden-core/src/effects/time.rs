//! Block clock effect.

/// Block timestamp in seconds since the Unix epoch
pub type Timestamp = u64;

/// Host block clock
///
/// Timestamps are monotonic non-decreasing across an account's transaction
/// history. The account never reads wall-clock time directly.
pub trait TimeEffects: Send + Sync {
    /// Timestamp of the block executing the current transaction
    fn block_timestamp(&self) -> Timestamp;
}

impl<T: TimeEffects + ?Sized> TimeEffects for std::sync::Arc<T> {
    fn block_timestamp(&self) -> Timestamp {
        (**self).block_timestamp()
    }
}

impl<T: TimeEffects + ?Sized> TimeEffects for &T {
    fn block_timestamp(&self) -> Timestamp {
        (**self).block_timestamp()
    }
}
