//! Salted password credential.

use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

const SALT_BYTES: usize = 32;

/// Hex-encoded SHA-256 of `salt || password`, together with its salt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    hash: String,
    salt: String,
}

impl Credential {
    /// Hashes a password under a freshly generated salt.
    pub fn derive(password: &str) -> Self {
        let mut bytes = [0u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let salt = hex::encode(bytes);
        let hash = digest(&salt, password);
        Self { hash, salt }
    }

    /// Rebuilds a stored credential.
    pub fn from_parts(hash: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            salt: salt.into(),
        }
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Checks a password in constant time.
    pub fn verify(&self, password: &str) -> bool {
        let candidate = digest(&self.salt, password);
        candidate.as_bytes().ct_eq(self.hash.as_bytes()).into()
    }
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
