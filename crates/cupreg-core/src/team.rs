//! Captain accounts and the backing account store.
//!
//! The rest of the application treats the store as an external
//! collaborator: the [`TeamStore`] trait is the seam, and
//! [`MemoryTeamStore`] is the process-local default. A SQL-backed
//! deployment implements the same trait without changing any caller.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// A registered team and its captain account.
///
/// `credential` is the stored login credential: a bcrypt hash for
/// accounts issued by this system, or a legacy plaintext value for
/// accounts that predate hashing. It is never serialized to clients.
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub captain_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub division: Option<String>,
    #[serde(skip_serializing)]
    pub credential: String,
}

/// Account lookup and creation, keyed by the captain's email.
///
/// Emails are compared case-insensitively; implementations normalise to
/// lowercase. A lookup failure of the store itself is
/// [`CoreError::Store`], distinct from "no such account" (`Ok(None)`):
/// callers must not charge a rate-limit failure for an account the
/// system failed to even look up.
#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> CoreResult<Option<Team>>;

    /// Insert a new team. Fails with [`CoreError::EmailTaken`] when the
    /// email is already registered.
    async fn insert(&self, team: Team) -> CoreResult<()>;
}

/// In-memory [`TeamStore`], keyed by lowercase email.
#[derive(Default)]
pub struct MemoryTeamStore {
    teams: DashMap<String, Team>,
}

impl MemoryTeamStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

#[async_trait]
impl TeamStore for MemoryTeamStore {
    async fn find_by_email(&self, email: &str) -> CoreResult<Option<Team>> {
        Ok(self
            .teams
            .get(&email.to_lowercase())
            .map(|entry| entry.clone()))
    }

    async fn insert(&self, team: Team) -> CoreResult<()> {
        use dashmap::mapref::entry::Entry;

        match self.teams.entry(team.email.to_lowercase()) {
            Entry::Occupied(_) => Err(CoreError::EmailTaken(team.email)),
            Entry::Vacant(slot) => {
                slot.insert(team);
                Ok(())
            }
        }
    }
}
