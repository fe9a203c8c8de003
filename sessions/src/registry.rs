use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use dashmap::DashMap;
use log::*;
use rand::RngCore;
use std::fmt;

/// Number of random bytes backing a token. 32 bytes gives 256 bits of
/// entropy, comfortably above the guessability floor for bearer tokens.
const TOKEN_BYTES: usize = 32;

/// An opaque session token. Treated as a pure capability handle: its
/// value carries no structure and is never parsed, only compared against
/// the registry's current entry for an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generates a fresh token from the thread-local CSPRNG, encoded
    /// URL- and header-safe.
    fn generate() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Process-wide registry mapping a user's email to their single current
/// session token.
///
/// All three operations are atomic per email: a completed
/// `create_session` is visible to every subsequent `get_session`, and no
/// reader can observe a partially written entry. The registry is owned by
/// the application state and handed to consumers by reference, so tests
/// construct fresh instances freely.
pub struct SessionRegistry {
    sessions: DashMap<String, SessionToken>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Issues a new token for `email`, atomically replacing any existing
    /// entry. Any previously issued token for this email stops being
    /// valid the moment this returns.
    pub fn create_session(&self, email: &str) -> SessionToken {
        let token = SessionToken::generate();
        if self
            .sessions
            .insert(email.to_owned(), token.clone())
            .is_some()
        {
            info!("superseding existing session for {email}");
        }
        token
    }

    /// Returns the current token for `email`, if one exists. Pure read.
    pub fn get_session(&self, email: &str) -> Option<SessionToken> {
        self.sessions.get(email).map(|entry| entry.value().clone())
    }

    /// Removes the entry for `email`. Deleting an email with no active
    /// session is a no-op, not an error.
    pub fn delete_session(&self, email: &str) {
        self.sessions.remove(email);
    }

    /// True when `presented` matches the registry's current token for
    /// `email`. One lookup, one comparison; this is the whole
    /// authorization decision.
    pub fn is_current(&self, email: &str, presented: &str) -> bool {
        match self.get_session(email) {
            Some(token) => token.as_str() == presented,
            None => false,
        }
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn create_then_get_returns_the_issued_token() {
        let registry = SessionRegistry::new();
        let token = registry.create_session("a@x.com");
        assert_eq!(registry.get_session("a@x.com"), Some(token));
    }

    #[test]
    fn second_create_supersedes_the_first() {
        let registry = SessionRegistry::new();
        let first = registry.create_session("a@x.com");
        let second = registry.create_session("a@x.com");

        assert_ne!(first, second);
        assert_eq!(registry.get_session("a@x.com"), Some(second.clone()));
        assert!(!registry.is_current("a@x.com", first.as_str()));
        assert!(registry.is_current("a@x.com", second.as_str()));
    }

    #[test]
    fn sessions_are_independent_per_email() {
        let registry = SessionRegistry::new();
        let a = registry.create_session("a@x.com");
        let b = registry.create_session("b@x.com");

        registry.delete_session("a@x.com");

        assert_eq!(registry.get_session("a@x.com"), None);
        assert_eq!(registry.get_session("b@x.com"), Some(b));
        assert!(!registry.is_current("b@x.com", a.as_str()));
    }

    #[test]
    fn delete_then_get_is_absent() {
        let registry = SessionRegistry::new();
        registry.create_session("a@x.com");
        registry.delete_session("a@x.com");
        assert_eq!(registry.get_session("a@x.com"), None);
    }

    #[test]
    fn delete_of_absent_email_is_a_noop() {
        let registry = SessionRegistry::new();
        registry.delete_session("nobody@x.com");
        assert_eq!(registry.get_session("nobody@x.com"), None);
    }

    #[test]
    fn tokens_are_unique_and_header_safe() {
        let registry = SessionRegistry::new();
        let mut seen = std::collections::HashSet::new();
        for i in 0..1000 {
            let token = registry.create_session(&format!("user{i}@x.com"));
            assert!(token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
            assert!(seen.insert(token.as_str().to_owned()));
        }
    }

    #[test]
    fn concurrent_creates_leave_exactly_one_winner() {
        for _ in 0..100 {
            let registry = Arc::new(SessionRegistry::new());

            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let registry = Arc::clone(&registry);
                    thread::spawn(move || registry.create_session("a@x.com"))
                })
                .collect();

            let issued: Vec<SessionToken> =
                handles.into_iter().map(|h| h.join().unwrap()).collect();

            let current = registry.get_session("a@x.com").unwrap();
            assert!(issued.contains(&current));
        }
    }

    #[test]
    fn concurrent_mixed_operations_do_not_corrupt_the_map() {
        let registry = Arc::new(SessionRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let email = format!("user{}@x.com", i % 4);
                    for _ in 0..500 {
                        let token = registry.create_session(&email);
                        let _ = registry.is_current(&email, token.as_str());
                        let _ = registry.get_session(&email);
                        registry.delete_session(&email);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        // Every worker finished with a delete, so whatever interleaving
        // happened the registry must still answer reads consistently.
        for i in 0..4 {
            let email = format!("user{i}@x.com");
            if let Some(token) = registry.get_session(&email) {
                assert!(registry.is_current(&email, token.as_str()));
            }
        }
    }
}
