//! Hashed bag-of-words encoder.
//!
//! Each lowercase term is hashed with blake3 into a bucket and a sign, then
//! the bucket receives the term's log-scaled frequency. The result is L2
//! normalised. Deterministic and offline, but lexical rather than semantic:
//! scores against model-produced vectors are only meaningful between
//! vectors this encoder produced.

use std::collections::HashMap;

use vaultsense_core::constants;
use vaultsense_core::errors::VaultResult;
use vaultsense_core::IQueryEncoder;

#[derive(Debug, Clone)]
pub struct HashingEncoder {
    dimensions: usize,
}

impl Default for HashingEncoder {
    fn default() -> Self {
        Self::new(constants::MODEL_DIMENSIONS)
    }
}

impl HashingEncoder {
    /// `dimensions` of zero is raised to one.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.chars().count() >= 2)
            .map(str::to_lowercase)
    }

    /// Bucket index and sign for a term.
    fn bucket(&self, term: &str) -> (usize, f32) {
        let hash = blake3::hash(term.as_bytes());
        let bytes = hash.as_bytes();
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[..8]);
        let h = u64::from_le_bytes(word);
        let sign = if bytes[8] & 1 == 0 { 1.0 } else { -1.0 };
        ((h % self.dimensions as u64) as usize, sign)
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for term in Self::terms(text) {
            *counts.entry(term).or_default() += 1;
        }

        let mut vector = vec![0.0f32; self.dimensions];
        for (term, count) in &counts {
            let (index, sign) = self.bucket(term);
            vector[index] += sign * (1.0 + (*count as f32).ln());
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        vector
    }
}

impl IQueryEncoder for HashingEncoder {
    fn encode(&self, text: &str) -> VaultResult<Vec<f32>> {
        Ok(self.vectorize(text))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }

    fn is_available(&self) -> bool {
        true
    }
}
