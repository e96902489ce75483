//! Captain password verification and issuance.
//!
//! Stored captain credentials come in two forms: the modern bcrypt hash
//! (recognisable by its `$2…$` prefix) and, for accounts created before
//! hashing was introduced, a legacy plaintext value. Verification accepts
//! both so old accounts keep working; issuance only ever produces the
//! modern form. Legacy credentials are not rewritten on login.

use crate::error::{CoreError, CoreResult};

/// Cost factor for newly issued bcrypt hashes.
pub const HASH_COST: u32 = 10;

const BCRYPT_PREFIXES: [&str; 3] = ["$2a$", "$2b$", "$2y$"];

/// A credential as stored on a captain account.
///
/// Modelled as a tagged variant rather than sniffing strings at every
/// call site; the legacy arm is the single place a future
/// rehash-on-login migration would hook into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredCredential {
    /// Modern salted hash, self-describing via its prefix.
    BcryptHash(String),
    /// Pre-hashing account: the password itself.
    LegacyPlaintext(String),
}

impl StoredCredential {
    /// Classify a stored credential string by its prefix.
    pub fn parse(stored: &str) -> Self {
        if BCRYPT_PREFIXES.iter().any(|p| stored.starts_with(p)) {
            StoredCredential::BcryptHash(stored.to_string())
        } else {
            StoredCredential::LegacyPlaintext(stored.to_string())
        }
    }

    /// Check `supplied` against this credential.
    ///
    /// A bcrypt mismatch is `Ok(false)`; only a fault in the hashing
    /// primitive itself (e.g. a corrupted stored hash) is an error.
    pub fn verify(&self, supplied: &str) -> CoreResult<bool> {
        match self {
            StoredCredential::BcryptHash(hash) => {
                bcrypt::verify(supplied, hash).map_err(|e| CoreError::Hash(e.to_string()))
            }
            StoredCredential::LegacyPlaintext(plain) => Ok(supplied == plain),
        }
    }
}

/// Check a submitted password against a stored captain credential.
///
/// Either side being empty is an immediate mismatch with no comparison
/// attempted.
pub fn verify_captain_password(supplied: &str, stored: &str) -> CoreResult<bool> {
    if supplied.is_empty() || stored.is_empty() {
        return Ok(false);
    }
    StoredCredential::parse(stored).verify(supplied)
}

/// Hash a new password in the modern stored form.
///
/// Deliberately slow (tens of milliseconds); callers on an async runtime
/// run this under `spawn_blocking`.
pub fn hash_password(plain: &str) -> CoreResult<String> {
    bcrypt::hash(plain, HASH_COST).map_err(|e| CoreError::Hash(e.to_string()))
}

/// Acceptability policy for newly issued passwords: at least 6 characters,
/// at least one uppercase letter, at least one digit.
///
/// The rejection names the specific rule that failed so registration can
/// show it to the user.
pub fn validate_new_password(plain: &str) -> CoreResult<()> {
    if plain.chars().count() < 6 {
        return Err(CoreError::WeakPassword(
            "password must be at least 6 characters".to_string(),
        ));
    }
    if !plain.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(CoreError::WeakPassword(
            "password must contain an uppercase letter".to_string(),
        ));
    }
    if !plain.chars().any(|c| c.is_ascii_digit()) {
        return Err(CoreError::WeakPassword(
            "password must contain a digit".to_string(),
        ));
    }
    Ok(())
}
