//! Table sessions for customer ordering
//!
//! A session is minted when a customer opens a table URL: an
//! unguessable random token bound server-side to (restaurant, table)
//! with an expiry. Order mutations require the creating session's
//! token, so knowing a table code alone never grants write access to
//! someone else's order.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use ring::rand::{SecureRandom, SystemRandom};
use shared::{DomainError, DomainResult};

/// One customer table session
#[derive(Debug, Clone)]
pub struct TableSession {
    pub token: String,
    pub restaurant_id: String,
    pub table_id: String,
    pub expires_at: DateTime<Utc>,
}

impl TableSession {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// In-memory session registry
///
/// Sessions are ephemeral by design: a server restart logs every
/// table out and customers re-scan the QR code. Orders keep the
/// creating session id as a plain string, so history survives.
pub struct SessionService {
    sessions: DashMap<String, TableSession>,
    ttl_minutes: i64,
}

impl SessionService {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl_minutes,
        }
    }

    /// Mint a session for a resolved table
    pub fn issue(&self, restaurant_id: &str, table_id: &str) -> DomainResult<TableSession> {
        let session = TableSession {
            token: random_token()?,
            restaurant_id: restaurant_id.to_string(),
            table_id: table_id.to_string(),
            expires_at: Utc::now() + Duration::minutes(self.ttl_minutes),
        };
        self.sessions.insert(session.token.clone(), session.clone());
        tracing::debug!(
            restaurant_id = %session.restaurant_id,
            table_id = %session.table_id,
            "Table session issued"
        );
        Ok(session)
    }

    /// Resolve a token to its live session; expired entries are
    /// dropped on access
    pub fn resolve(&self, token: &str) -> Option<TableSession> {
        let session = self.sessions.get(token)?.clone();
        if session.is_expired() {
            drop(self.sessions.remove(token));
            return None;
        }
        Some(session)
    }

    /// Drop all expired sessions
    pub fn prune_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired());
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// 32 random bytes, hex encoded
fn random_token() -> DomainResult<String> {
    let rng = SystemRandom::new();
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes)
        .map_err(|_| DomainError::transport("OS random generator unavailable"))?;
    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_resolve() {
        let service = SessionService::new(60);
        let session = service.issue("rest-1", "table-1").unwrap();
        assert_eq!(session.token.len(), 64);

        let resolved = service.resolve(&session.token).unwrap();
        assert_eq!(resolved.restaurant_id, "rest-1");
        assert_eq!(resolved.table_id, "table-1");
    }

    #[test]
    fn test_unknown_token_is_none() {
        let service = SessionService::new(60);
        assert!(service.resolve("nope").is_none());
    }

    #[test]
    fn test_expired_session_is_dropped_on_access() {
        let service = SessionService::new(0);
        let session = service.issue("rest-1", "table-1").unwrap();
        assert!(service.resolve(&session.token).is_none());
        assert!(service.is_empty());
    }

    #[test]
    fn test_tokens_are_unique() {
        let service = SessionService::new(60);
        let a = service.issue("rest-1", "table-1").unwrap();
        let b = service.issue("rest-1", "table-1").unwrap();
        assert_ne!(a.token, b.token);
        assert_eq!(service.len(), 2);
    }

    #[test]
    fn test_prune_expired() {
        let service = SessionService::new(0);
        service.issue("rest-1", "table-1").unwrap();
        service.issue("rest-1", "table-2").unwrap();
        assert_eq!(service.prune_expired(), 2);
        assert!(service.is_empty());
    }
}
