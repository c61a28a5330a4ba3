use pumpwatch_core::Timestamp;

/// Source of refresh-cycle and alert timestamps
///
/// The engine reads it once per refresh so every record in a cycle carries
/// the same time, and once per created alert.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
