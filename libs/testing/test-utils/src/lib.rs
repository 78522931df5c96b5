//! Shared test infrastructure:
//! - `TestVectorDb`: a standalone vector database container with automatic
//!   cleanup, for live integration tests.
//! - `TestDataBuilder`: deterministic test data generation.
//!
//! # Usage
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestVectorDb};
//!
//! # async fn example() {
//! let db = TestVectorDb::new().await;
//! let builder = TestDataBuilder::from_test_name("my_test");
//!
//! let uri = db.uri();
//! let vectors = builder.float_vectors(10, 4);
//! # let _ = (uri, vectors);
//! # }
//! ```

mod vector_db;

pub use vector_db::TestVectorDb;

/// Builder for test data with deterministic randomization
///
/// This ensures tests are reproducible by using seeded data.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    /// Create a new builder with a seed (for deterministic tests)
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Create from test name (generates seed from test name hash)
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self {
            seed: hasher.finish(),
        }
    }

    /// A collection name unique to this builder's seed.
    pub fn collection_name(&self, prefix: &str) -> String {
        format!("{}_{:08x}", prefix, self.seed as u32)
    }

    /// Deterministic float vectors, `rows` rows of `dim` elements each.
    pub fn float_vectors(&self, rows: usize, dim: usize) -> Vec<Vec<f32>> {
        let mut state = self.seed | 1;
        (0..rows)
            .map(|_| {
                (0..dim)
                    .map(|_| {
                        // xorshift64, mapped into [0, 1)
                        state ^= state << 13;
                        state ^= state >> 7;
                        state ^= state << 17;
                        (state >> 40) as f32 / (1u64 << 24) as f32
                    })
                    .collect()
            })
            .collect()
    }

    /// Sequential int64 primary keys starting at 1.
    pub fn int_ids(&self, rows: usize) -> Vec<i64> {
        (1..=rows as i64).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_is_deterministic() {
        let a = TestDataBuilder::from_test_name("test_x").float_vectors(3, 8);
        let b = TestDataBuilder::from_test_name("test_x").float_vectors(3, 8);
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        assert_eq!(a[0].len(), 8);
    }

    #[test]
    fn test_different_names_differ() {
        let a = TestDataBuilder::from_test_name("test_a").float_vectors(1, 4);
        let b = TestDataBuilder::from_test_name("test_b").float_vectors(1, 4);
        assert_ne!(a, b);
    }

    #[test]
    fn test_collection_name_carries_prefix() {
        let name = TestDataBuilder::from_test_name("test_a").collection_name("films");
        assert!(name.starts_with("films_"));
    }
}
