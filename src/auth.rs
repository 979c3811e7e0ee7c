//! Admin credential check.
//!
//! The review panel is guarded by one shared password. Handlers only see the
//! [`CredentialVerifier`] trait so a hashed or external check can replace
//! [`StaticPassword`] without touching the routes.

pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, presented: &str) -> bool;
}

/// Compares against a password read from configuration.
pub struct StaticPassword {
    expected: String,
}

impl StaticPassword {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }
}

impl CredentialVerifier for StaticPassword {
    fn verify(&self, presented: &str) -> bool {
        let expected = self.expected.as_bytes();
        let presented = presented.as_bytes();
        if expected.is_empty() || expected.len() != presented.len() {
            return false;
        }
        // Fold over every byte so timing does not depend on the first mismatch.
        expected
            .iter()
            .zip(presented)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}
