//! cupreg core library — transport-agnostic login protection logic.
//!
//! `cupreg-core` provides the credential-verification and abuse-prevention
//! layer behind the cupreg tournament-registration service. It is
//! intentionally decoupled from any HTTP framework so that the web
//! frontend (`cupreg-web`) stays thin request/response glue over the
//! same underlying logic.
//!
//! # Modules
//!
//! - [`auth`] — Login protection: the per-identity [`RateLimiter`], the
//!   administrator-secret check, and captain password verification/issuance.
//! - [`team`] — Captain accounts: [`Team`], the [`TeamStore`] seam, and the
//!   in-memory default implementation.
//! - [`error`] — Unified error type ([`CoreError`]) and result alias
//!   ([`CoreResult`]).

pub mod auth;
pub mod error;
pub mod team;

pub use auth::password::{
    hash_password, validate_new_password, verify_captain_password, StoredCredential, HASH_COST,
};
pub use auth::rate_limit::{
    EndpointClass, RateLimitDecision, RateLimiter, ATTEMPT_WINDOW, MAX_ADMIN_ATTEMPTS,
    MAX_CAPTAIN_ATTEMPTS,
};
pub use auth::secret::verify_admin_secret;
pub use error::{CoreError, CoreResult};
pub use team::{MemoryTeamStore, Team, TeamStore};
