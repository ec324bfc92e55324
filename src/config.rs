#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex, OnceLock},
};

use anyhow::{Context, Result};

use crate::{
    auth::StaticCredentials,
    constants::{
        DEFAULT_CSV_PATH, DEFAULT_DOCUMENT_PATH, ENV_ADMIN_PASSWORD, ENV_ADMIN_USER,
        ENV_CSV_PATH, ENV_DOCUMENT_PATH, ENV_POLICY,
    },
    grade::GradingPolicy,
};

/// Admin credentials loaded from the environment, if available.
#[derive(Clone)]
struct AdminEnv {
    /// Expected username.
    username: String,
    /// Expected password.
    password: String,
}

impl std::fmt::Debug for AdminEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminEnv")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Runtime configuration shared across the crate.
#[derive(Debug, Clone)]
pub struct ConfigState {
    /// Policy used when a command does not name one.
    policy:        GradingPolicy,
    /// Tabular store location.
    csv_path:      PathBuf,
    /// Document store location.
    document_path: PathBuf,
    /// Admin credentials, if configured.
    admin:         Option<AdminEnv>,
}

impl ConfigState {
    /// Construct a new configuration instance from the process environment.
    fn new() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Construct a configuration from an arbitrary key lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let policy = match read(ENV_POLICY) {
            Some(name) => name
                .parse::<GradingPolicy>()
                .with_context(|| format!("Invalid {ENV_POLICY}"))?,
            None => GradingPolicy::default(),
        };

        let csv_path = read(ENV_CSV_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV_PATH));
        let document_path = read(ENV_DOCUMENT_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCUMENT_PATH));

        let admin = match (read(ENV_ADMIN_USER), read(ENV_ADMIN_PASSWORD)) {
            (Some(username), Some(password)) => Some(AdminEnv { username, password }),
            (None, None) => None,
            _ => {
                tracing::warn!(
                    "Only one of {ENV_ADMIN_USER} and {ENV_ADMIN_PASSWORD} is set; admin login \
                     stays disabled"
                );
                None
            }
        };

        Ok(Self {
            policy,
            csv_path,
            document_path,
            admin,
        })
    }

    /// Returns the default grading policy.
    pub fn policy(&self) -> GradingPolicy {
        self.policy
    }

    /// Returns the tabular store path.
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    /// Returns the document store path.
    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    /// Whether admin credentials were configured.
    pub fn admin_configured(&self) -> bool {
        self.admin.is_some()
    }

    /// Builds the authenticator for the configured admin account. With no
    /// account configured it refuses every login.
    pub fn authenticator(&self) -> StaticCredentials {
        match &self.admin {
            Some(admin) => StaticCredentials::new(&admin.username, &admin.password),
            None => StaticCredentials::disabled(),
        }
    }
}

/// Shared configuration handle used throughout the crate.
#[derive(Clone, Debug)]
pub struct ConfigHandle(Arc<ConfigState>);

impl std::ops::Deref for ConfigHandle {
    type Target = ConfigState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Global storage for the lazily constructed configuration state.
static CONFIG_SLOT: OnceLock<Mutex<Option<Arc<ConfigState>>>> = OnceLock::new();

/// Returns the mutex guarding the global configuration slot.
fn slot() -> &'static Mutex<Option<Arc<ConfigState>>> {
    CONFIG_SLOT.get_or_init(|| Mutex::new(None))
}

/// Ensure the global configuration has been initialized and return a handle.
pub fn ensure_initialized() -> Result<ConfigHandle> {
    let mut guard = slot()
        .lock()
        .map_err(|_| anyhow::anyhow!("config slot poisoned"))?;
    if let Some(cfg) = guard.as_ref() {
        return Ok(ConfigHandle(Arc::clone(cfg)));
    }

    let cfg = Arc::new(ConfigState::new()?);
    *guard = Some(Arc::clone(&cfg));
    Ok(ConfigHandle(cfg))
}
