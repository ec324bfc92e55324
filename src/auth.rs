#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Decides whether a username/password pair may administer the roster.
pub trait Authenticator {
    /// Returns `true` when the pair is accepted.
    fn verify(&self, username: &str, password: &str) -> bool;
}

impl<F> Authenticator for F
where
    F: Fn(&str, &str) -> bool,
{
    fn verify(&self, username: &str, password: &str) -> bool {
        self(username, password)
    }
}

/// Returned when a login is refused.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Username or password did not match.
    #[error("Invalid credentials.")]
    InvalidCredentials,
}

/// Accepts exactly one configured username/password pair.
#[derive(Clone, Default)]
pub struct StaticCredentials {
    /// The accepted pair; `None` refuses everyone.
    account: Option<(String, String)>,
}

impl StaticCredentials {
    /// Accepts only `username` with `password`.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: Some((username.into(), password.into())),
        }
    }

    /// Refuses every login.
    pub fn disabled() -> Self {
        Self { account: None }
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.account.as_ref().map(|(u, _)| u))
            .finish_non_exhaustive()
    }
}

/// Compares without stopping at the first mismatching byte.
fn same_bytes(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a.bytes()
            .zip(b.bytes())
            .fold(0u8, |acc, (x, y)| acc | (x ^ y))
            == 0
}

impl Authenticator for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        match &self.account {
            Some((u, p)) => same_bytes(u, username) & same_bytes(p, password),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_the_configured_pair() {
        let auth = StaticCredentials::new("admin", "hunter2");
        assert!(auth.verify("admin", "hunter2"));
        assert!(!auth.verify("admin", "hunter"));
        assert!(!auth.verify("Admin", "hunter2"));
        assert!(!auth.verify("", ""));
    }

    #[test]
    fn disabled_refuses_everyone() {
        let auth = StaticCredentials::disabled();
        assert!(!auth.verify("admin", "admin123"));
        assert!(!auth.verify("", ""));
    }

    #[test]
    fn closures_are_authenticators() {
        let auth = |u: &str, _: &str| u == "registrar";
        assert!(auth.verify("registrar", "anything"));
        assert!(!auth.verify("student", "anything"));
    }

    #[test]
    fn debug_hides_password() {
        let shown = format!("{:?}", StaticCredentials::new("admin", "hunter2"));
        assert!(shown.contains("admin"));
        assert!(!shown.contains("hunter2"));
    }
}
