//! Order number generation strategies
//!
//! Three interchangeable generators behind one trait, selected by
//! configuration. None guarantees global uniqueness under all failure
//! modes (the time-based one can collide); that is accepted at this
//! catalog's throughput.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use rand::Rng;
use uuid::Uuid;

/// Pluggable order number generator
pub trait OrderNumberGenerator: Send + Sync {
    fn generate(&self) -> String;
}

fn epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Default strategy: truncated v4 UUID
pub struct UuidOrderNumbers;

impl OrderNumberGenerator for UuidOrderNumbers {
    fn generate(&self) -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!("ORD-{}", id[..12].to_uppercase())
    }
}

/// Atomic counter combined with epoch seconds
pub struct SequentialOrderNumbers {
    counter: AtomicU64,
}

impl SequentialOrderNumbers {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialOrderNumbers {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderNumberGenerator for SequentialOrderNumbers {
    fn generate(&self) -> String {
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("ORD-{}-{:06}", epoch_secs(), seq)
    }
}

/// Clock millis plus a random suffix
pub struct TimestampOrderNumbers;

impl OrderNumberGenerator for TimestampOrderNumbers {
    fn generate(&self) -> String {
        let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
        format!("ORD-{}{:04}", epoch_millis(), suffix)
    }
}

/// Build the generator named by the configured strategy
pub fn from_strategy(strategy: &str) -> Result<Arc<dyn OrderNumberGenerator>> {
    match strategy {
        "uuid" => Ok(Arc::new(UuidOrderNumbers)),
        "sequential" => Ok(Arc::new(SequentialOrderNumbers::new())),
        "timestamp" => Ok(Arc::new(TimestampOrderNumbers)),
        other => anyhow::bail!("unknown order number strategy: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_numbers_shape() {
        let number = UuidOrderNumbers.generate();
        assert!(number.starts_with("ORD-"));
        assert_eq!(number.len(), "ORD-".len() + 12);
        assert_ne!(number, UuidOrderNumbers.generate());
    }

    #[test]
    fn test_sequential_numbers_increment() {
        let generator = SequentialOrderNumbers::new();
        let first = generator.generate();
        let second = generator.generate();
        assert!(first.ends_with("-000001"), "got {first}");
        assert!(second.ends_with("-000002"), "got {second}");
    }

    #[test]
    fn test_timestamp_numbers_shape() {
        let number = TimestampOrderNumbers.generate();
        assert!(number.starts_with("ORD-"));
        assert!(number["ORD-".len()..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_factory_resolves_strategies() {
        assert!(from_strategy("uuid").is_ok());
        assert!(from_strategy("sequential").is_ok());
        assert!(from_strategy("timestamp").is_ok());
        assert!(from_strategy("lottery").is_err());
    }
}
