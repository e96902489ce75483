pub mod client_identity;

pub use client_identity::ClientIdentity;
