//! Credential verification and abuse prevention for the two login surfaces.
//!
//! The flow for any login attempt is: derive the client identity, ask
//! [`rate_limit::RateLimiter::check`] whether the attempt is allowed,
//! and only then invoke the verifier for the surface in question
//! ([`secret::verify_admin_secret`] or
//! [`password::verify_captain_password`]). A verified mismatch is
//! reported back via [`rate_limit::RateLimiter::record_failure`];
//! a match records nothing.

pub mod password;
pub mod rate_limit;
pub mod secret;
