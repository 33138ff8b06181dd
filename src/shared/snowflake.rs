//! Snowflake ID Generator
//!
//! Time-ordered unique ID generation. Message ids generated here sort in
//! creation order within a single process, which breaks ties between
//! messages sharing a second-granularity timestamp.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Custom epoch (2015-01-01T00:00:00.000Z)
const ID_EPOCH: u64 = 1420070400000;

/// Sequence numbers per millisecond (12 bits).
const SEQUENCE_MASK: u64 = 0xFFF;

/// Snowflake ID generator
pub struct SnowflakeGenerator {
    machine_id: u64,
    state: Mutex<GeneratorState>,
}

/// Timestamp and sequence advance together under one lock; ids minted
/// by concurrent callers in the same millisecond stay distinct.
struct GeneratorState {
    last_timestamp: u64,
    sequence: u64,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator
    pub fn new(machine_id: u64) -> Self {
        Self {
            machine_id: machine_id & 0x3FF, // 10 bits
            state: Mutex::new(GeneratorState {
                last_timestamp: 0,
                sequence: 0,
            }),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // A clock step backwards must not reissue an earlier timestamp.
        let mut timestamp = Self::current_timestamp().max(state.last_timestamp);

        if timestamp == state.last_timestamp {
            state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
            if state.sequence == 0 {
                // Sequence exhausted for this millisecond; spin to the next.
                while timestamp <= state.last_timestamp {
                    timestamp = Self::current_timestamp();
                }
            }
        } else {
            state.sequence = 0;
        }

        state.last_timestamp = timestamp;

        let id = ((timestamp - ID_EPOCH) << 22) | (self.machine_id << 12) | state.sequence;

        id as i64
    }

    /// Get current timestamp in milliseconds
    fn current_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_millis() as u64
    }
}

/// Extract timestamp from snowflake ID
pub fn extract_timestamp(snowflake: i64) -> u64 {
    ((snowflake as u64) >> 22) + ID_EPOCH
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_generate_unique() {
        let gen = SnowflakeGenerator::new(1);
        let id1 = gen.generate();
        let id2 = gen.generate();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_ids_are_time_ordered() {
        let gen = SnowflakeGenerator::new(1);
        let ids: Vec<i64> = (0..64).map(|_| gen.generate()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_concurrent_generate_is_unique() {
        const THREADS: usize = 8;
        const IDS_PER_THREAD: usize = 20_000;

        let gen = Arc::new(SnowflakeGenerator::new(1));
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let gen = Arc::clone(&gen);
                std::thread::spawn(move || {
                    (0..IDS_PER_THREAD)
                        .map(|_| gen.generate())
                        .collect::<Vec<i64>>()
                })
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(all.insert(id), "duplicate id {}", id);
            }
        }
        assert_eq!(all.len(), THREADS * IDS_PER_THREAD);
    }

    #[test]
    fn test_sequence_exhaustion_rolls_to_next_millisecond() {
        let gen = SnowflakeGenerator::new(1);
        // More than 4096 ids; exhausting a millisecond's sequence space
        // must advance the timestamp rather than wrap into a reused id.
        let ids: Vec<i64> = (0..5000).map(|_| gen.generate()).collect();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_extract_timestamp() {
        let gen = SnowflakeGenerator::new(1);
        let id = gen.generate();
        let ts = extract_timestamp(id);
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;
        assert!(ts <= now);
        assert!(ts > now - 1000); // Within 1 second
    }
}
