//! Administrator shared-secret verification.
//!
//! The administrator console is guarded by a single process-wide secret,
//! compared on every attempt. The comparison is hardened against timing
//! side channels: both operands are digested to a fixed length first, then
//! compared with a routine whose running time depends only on that fixed
//! length, never on where the first differing byte occurs and never on
//! the length of the submitted guess.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::{CoreError, CoreResult};

/// Check a submitted password against the configured administrator secret.
///
/// Returns `Err(CoreError::AdminSecretMissing)` when no secret is
/// configured: a deployment fault, reported as such rather than as a
/// mismatch charged to the caller.
pub fn verify_admin_secret(supplied: &str, configured: &str) -> CoreResult<bool> {
    if configured.is_empty() {
        return Err(CoreError::AdminSecretMissing);
    }

    // Fixed-length digests keep operand length itself out of the timing
    // side channel.
    let supplied_digest = Sha256::digest(supplied.as_bytes());
    let configured_digest = Sha256::digest(configured.as_bytes());

    Ok(supplied_digest
        .as_slice()
        .ct_eq(configured_digest.as_slice())
        .into())
}
