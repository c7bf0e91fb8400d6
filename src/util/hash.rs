//! Fingerprinting.

use sha2::{Digest, Sha256};

/// A hasher for building fingerprints from multiple components.
#[derive(Default)]
pub struct Fingerprint {
    hasher: Sha256,
}

impl Fingerprint {
    pub fn new() -> Self {
        Fingerprint {
            hasher: Sha256::new(),
        }
    }

    /// Add a string component to the fingerprint.
    pub fn update_str(&mut self, s: &str) -> &mut Self {
        self.hasher.update(s.as_bytes());
        self.hasher.update(b"\0");
        self
    }

    /// Add a named field. Absent values hash differently from empty ones.
    pub fn update_field(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        self.update_str(key);
        match value {
            Some(v) => {
                self.hasher.update(b"\x01");
                self.update_str(v);
            }
            None => self.hasher.update(b"\x00"),
        }
        self
    }

    pub fn update_bool(&mut self, key: &str, b: bool) -> &mut Self {
        self.update_str(key);
        self.hasher.update([b as u8]);
        self
    }

    /// Finalize and return the fingerprint as a hex string.
    pub fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}
