//! Short unique identifiers for elements and slides.

use rand::Rng;

/// Length of generated element and slide ids.
pub const ELEMENT_ID_LENGTH: usize = 10;

/// URL-safe alphabet used for generated ids.
const ID_ALPHABET: &[u8; 64] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// Source of fresh identifiers for records that carry none.
pub trait IdGenerator: Send + Sync {
    /// Produce a new id of `len` characters.
    fn generate(&self, len: usize) -> String;
}

/// Random URL-safe ids in the nanoid style.
#[derive(Debug, Clone, Copy, Default)]
pub struct NanoIdGenerator;

impl NanoIdGenerator {
    /// Create a new generator backed by the thread-local RNG.
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for NanoIdGenerator {
    fn generate(&self, len: usize) -> String {
        let mut rng = rand::rng();
        (0..len)
            .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_length() {
        let generator = NanoIdGenerator::new();
        assert_eq!(generator.generate(ELEMENT_ID_LENGTH).len(), 10);
        assert_eq!(generator.generate(0), "");
    }

    #[test]
    fn test_generated_ids_are_url_safe() {
        let generator = NanoIdGenerator::new();
        let id = generator.generate(64);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-'));
    }

    #[test]
    fn test_generated_ids_do_not_collide() {
        let generator = NanoIdGenerator::new();
        let ids: HashSet<String> = (0..1000)
            .map(|_| generator.generate(ELEMENT_ID_LENGTH))
            .collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_alphabet_has_no_duplicates() {
        let unique: HashSet<&u8> = ID_ALPHABET.iter().collect();
        assert_eq!(unique.len(), ID_ALPHABET.len());
    }
}
