//! Entry and control number generation.
//!
//! Numbers have the form `{PREFIX}-{YYYYMMDDHHMMSS}-{NNNN}` where the
//! timestamp is the generation instant and the suffix is a random
//! 4-digit value between 0001 and 9999, zero-padded. Uniqueness is
//! enforced by a database constraint; callers retry on collision.

use chrono::{DateTime, Utc};
use rand::Rng;

/// Prefix for journal entry numbers.
pub const ENTRY_PREFIX: &str = "JE";
/// Prefix for reversal entry numbers.
pub const REVERSAL_PREFIX: &str = "REV";
/// Prefix for control numbers.
pub const CONTROL_PREFIX: &str = "CTL";

/// Generates human-readable entry and control numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlNumberGenerator;

impl ControlNumberGenerator {
    /// Creates a new generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generates a number with the given prefix at the current instant.
    #[must_use]
    pub fn generate(&self, prefix: &str) -> String {
        self.generate_at(prefix, Utc::now())
    }

    /// Generates a number with the given prefix at a fixed instant.
    #[must_use]
    pub fn generate_at(&self, prefix: &str, at: DateTime<Utc>) -> String {
        let suffix = rand::rng().random_range(1..=9999u16);
        format!("{}-{}-{:04}", prefix, at.format("%Y%m%d%H%M%S"), suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_number_format() {
        let generator = ControlNumberGenerator::new();
        let at = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 45).unwrap();
        let number = generator.generate_at(ENTRY_PREFIX, at);

        let parts: Vec<&str> = number.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "JE");
        assert_eq!(parts[1], "20260115093045");
        assert_eq!(parts[2].len(), 4);
        let suffix: u16 = parts[2].parse().unwrap();
        assert!((1..=9999).contains(&suffix));
    }

    #[test]
    fn test_prefixes() {
        let generator = ControlNumberGenerator::new();
        assert!(generator.generate(ENTRY_PREFIX).starts_with("JE-"));
        assert!(generator.generate(REVERSAL_PREFIX).starts_with("REV-"));
        assert!(generator.generate(CONTROL_PREFIX).starts_with("CTL-"));
    }

    #[test]
    fn test_suffix_always_four_digits() {
        let generator = ControlNumberGenerator::new();
        for _ in 0..100 {
            let number = generator.generate(CONTROL_PREFIX);
            let suffix = number.rsplit('-').next().unwrap();
            assert_eq!(suffix.len(), 4);
        }
    }
}
