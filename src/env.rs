//! Environment snapshot
//!
//! The resolver never reads the process environment from inside lookup code. The driver
//! captures the variables once at startup and hands the snapshot to every component that
//! needs it, so tests can build any environment they like without touching global state.

use std::collections::BTreeMap;

/// Set to `yes` to disable every shared folder for the run.
pub const DISABLE_FOLDERS_VAR: &str = "SSSD_TEST_SUITE_BOX";

/// Whitespace-separated `host:guest` overrides for sshfs mounts.
pub const SSHFS_FOLDERS_VAR: &str = "SSSD_TEST_SUITE_SSHFS";

/// Whitespace-separated `host:guest` overrides for nfs mounts.
pub const NFS_FOLDERS_VAR: &str = "SSSD_TEST_SUITE_NFS";

/// Whitespace-separated `host:guest` overrides for rsync mounts.
pub const RSYNC_FOLDERS_VAR: &str = "SSSD_TEST_SUITE_RSYNC";

/// Forwarded by name into the interactive shell of Linux guests when present.
pub const BASHRC_VAR: &str = "SSSD_TEST_SUITE_BASHRC";

/// Immutable set of environment variables captured for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Empty snapshot; nothing is set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn capture() -> Self {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }

    /// Value of `name`, if set.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// True when `name` is set to exactly `expected`.
    pub fn is(&self, name: &str, expected: &str) -> bool {
        self.get(name) == Some(expected)
    }

    /// All variables whose name starts with `prefix`.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.vars
            .iter()
            .filter(move |(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy of this snapshot with `name` set to `value`.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl FromIterator<(String, String)> for Environment {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}
