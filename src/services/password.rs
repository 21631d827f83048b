// Salted password hashing with Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use std::fmt::Debug;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    #[error("Failed to hash password: {0}")]
    Hashing(String),
}

/// Hashes and verifies user passwords.
pub trait PasswordHasher: Send + Sync + Debug {
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    /// False for a wrong password and for a malformed stored hash.
    fn verify(&self, password: &str, hash: &str) -> bool;

    /// Verifies against a throwaway hash made with the current parameters.
    /// Always false; costs the same as `verify` on a real account.
    fn verify_decoy(&self, password: &str) -> bool;
}

/// Argon2id hasher producing PHC strings (salt and parameters embedded).
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
    decoy: String,
}

impl Argon2Hasher {
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
        let decoy = hash_with(&params, "decoy password never issued")?;
        Ok(Self { params, decoy })
    }

    fn argon2(&self) -> Argon2<'static> {
        argon2_with(&self.params)
    }
}

fn argon2_with(params: &Params) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone())
}

fn hash_with(params: &Params, password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2_with(params)
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<String, PasswordError> {
        hash_with(&self.params, password)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        // Parameters come from the stored hash, so hashes made under older
        // settings still verify.
        self.argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    fn verify_decoy(&self, password: &str) -> bool {
        self.verify(password, &self.decoy);
        false
    }
}
