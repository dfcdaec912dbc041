//! Credential encryption seam.
//!
//! The cipher itself lives outside this crate. `SecretCodec` is the contract it
//! must meet; `CredentialStore` binds a codec to the application's key and salt
//! so callers only ever deal with plaintext passwords and stored ciphertext.

use crate::errors::SyncGuardError;

/// Symmetric encryption of short secrets, keyed by a passphrase and salt.
pub trait SecretCodec {
    fn encrypt(&self, plaintext: &str, key: &str, salt: &str) -> Result<String, SyncGuardError>;
    fn decrypt(&self, ciphertext: &str, key: &str, salt: &str) -> Result<String, SyncGuardError>;
}

/// A codec plus the key material used for stored passwords.
pub struct CredentialStore<C> {
    codec: C,
    key: String,
    salt: String,
}

impl<C: SecretCodec> CredentialStore<C> {
    pub fn new(codec: C, key: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            codec,
            key: key.into(),
            salt: salt.into(),
        }
    }

    /// Encrypt a password for storage in the config file.
    pub fn encrypt_password(&self, password: &str) -> Result<String, SyncGuardError> {
        self.codec.encrypt(password, &self.key, &self.salt)
    }

    /// Decrypt a stored password.
    pub fn decrypt_password(&self, stored: &str) -> Result<String, SyncGuardError> {
        self.codec.decrypt(stored, &self.key, &self.salt)
    }
}

impl<C> std::fmt::Debug for CredentialStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore").finish_non_exhaustive()
    }
}
