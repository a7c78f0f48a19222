//! Salted user-id hashing.

use sha2::{Digest, Sha256};

use crate::records::user_id;

/// Salt applied when no override is configured.
pub const DEFAULT_USER_SALT: &str = "project_salt_2025";

/// Hex characters kept from the SHA-256 digest.
pub const USER_HASH_LEN: usize = 16;

/// Hashes a user id with a salt: first 16 hex chars of `sha256(id ++ salt)`.
pub fn hash_user_id(base_id: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(base_id.as_bytes());
    hasher.update(salt.as_bytes());
    let mut hex = format!("{:x}", hasher.finalize());
    hex.truncate(USER_HASH_LEN);
    hex
}

/// Precomputed hashes for users `1..=len`.
#[derive(Debug, Clone)]
pub struct UserPool {
    hashes: Vec<String>,
}

impl UserPool {
    pub fn new(num_users: u32, salt: &str) -> Self {
        let hashes = (1..=num_users)
            .map(|n| hash_user_id(&user_id(n), salt))
            .collect();
        Self { hashes }
    }

    /// Hash for a 1-based user index.
    pub fn get(&self, n: u32) -> Option<&str> {
        let idx = (n as usize).checked_sub(1)?;
        self.hashes.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
