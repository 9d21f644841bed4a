//! One-way password hashing backed by bcrypt.
//!
//! Digests are in the modular crypt format (`$2b$<cost>$<salt><hash>`), so the
//! version, cost and salt travel with every stored digest. Verification reads
//! them back from the digest, which means raising the configured cost never
//! invalidates passwords hashed under an older one.

/// Error raised when a password cannot be hashed.
#[derive(Debug, thiserror::Error)]
#[error("Failed to hash password: {0}")]
pub struct HashError(#[from] bcrypt::BcryptError);

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Returns `true` only if `password` matches `digest`.
    /// A malformed digest is treated as a mismatch.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        match bcrypt::verify(password, digest) {
            Ok(matches) => matches,
            Err(e) => {
                log::debug!("password digest could not be verified: {}", e);
                false
            }
        }
    }
}
