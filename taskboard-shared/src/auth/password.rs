/// Password hashing using Argon2id
///
/// User credentials are never stored in plaintext. [`Argon2Hasher`] turns a
/// plaintext password into a PHC string (algorithm, parameters, salt, and hash
/// in one value) and [`verify_password`] checks a candidate against it using
/// the parameters embedded in the stored string.
///
/// # Parameters
///
/// The defaults are the production costs:
///
/// - **Memory**: 64 MB (65536 KiB)
/// - **Iterations**: 3 passes
/// - **Parallelism**: 4 lanes
/// - **Output**: 32-byte hash
///
/// Tests and local development can lower them through [`HashingParams`].
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::password::{verify_password, Argon2Hasher, HashingParams};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hasher = Argon2Hasher::new(HashingParams::default())?;
/// let hash = hasher.hash("super_secret_password_123")?;
///
/// assert!(verify_password("super_secret_password_123", &hash)?);
/// assert!(!verify_password("wrong_password", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString},
    Algorithm, Argon2, Params, ParamsBuilder, Version,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of passes over memory
    pub iterations: u32,

    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for HashingParams {
    fn default() -> Self {
        Self {
            memory_kib: 65536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

impl HashingParams {
    /// Minimum costs argon2 accepts; only suitable for tests.
    pub fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }
}

/// Hashes passwords with a fixed set of Argon2id parameters
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Builds a hasher, rejecting parameter combinations argon2 does not accept
    /// (e.g. memory below 8 KiB per lane).
    pub fn new(config: HashingParams) -> Result<Self, PasswordError> {
        let params = ParamsBuilder::new()
            .m_cost(config.memory_kib)
            .t_cost(config.iterations)
            .p_cost(config.parallelism)
            .output_len(32)
            .build()
            .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

        Ok(Self { params })
    }

    /// Hashes `password` with a fresh random salt
    ///
    /// Returns a PHC string such as
    /// `$argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>`.
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::HashError` if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone());

        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

        Ok(password_hash.to_string())
    }
}

/// Verifies a password against a stored hash
///
/// Comparison is constant-time. Returns `Ok(false)` on mismatch and an error
/// only when the stored hash cannot be parsed or verification itself fails.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;
    if parsed_hash.hash.is_none() {
        return Err(PasswordError::InvalidHash("hash has no output".to_string()));
    }

    // Parameters come from the hash itself
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}
