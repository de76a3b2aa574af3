//! Authentication seam: a small trait over credential verification so the
//! dashboard never touches a specific credential store.
//!
//! The shipped implementation, [`StaticCredentials`], compares against the
//! username → password mapping from the configuration file. Anything smarter
//! (hashed stores, directory services) plugs in behind [`Authenticator`]
//! without the UI changing.

use std::collections::BTreeMap;

/// The authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

/// Credential verification plus the current login state.
pub trait Authenticator {
    /// Check a username/password pair without changing login state.
    fn verify(&self, username: &str, password: &str) -> bool;

    /// Who is logged in, if anyone.
    fn current_user(&self) -> Option<&Identity>;
}

/// Credential mapping supplied by the configuration file.
#[derive(Debug, Default)]
pub struct StaticCredentials {
    credentials: BTreeMap<String, String>,
    current: Option<Identity>,
}

impl StaticCredentials {
    pub fn new(credentials: BTreeMap<String, String>) -> Self {
        Self {
            credentials,
            current: None,
        }
    }

    /// Verify and, on success, record the user as logged in.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        if self.verify(username, password) {
            tracing::info!(user = username, "login succeeded");
            self.current = Some(Identity {
                username: username.to_string(),
            });
            true
        } else {
            tracing::warn!(user = username, "login rejected");
            false
        }
    }

    pub fn logout(&mut self) {
        self.current = None;
    }
}

impl Authenticator for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.credentials
            .get(username)
            .is_some_and(|stored| stored == password)
    }

    fn current_user(&self) -> Option<&Identity> {
        self.current.as_ref()
    }
}
