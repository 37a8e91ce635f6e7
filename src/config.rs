//! Configuration for secrets-vault
//!
//! All paths are derived from a single project root so the tool behaves the
//! same locally and inside a CI job. The secret key is read once from the
//! `SECRETS_KEY` environment variable and injected into the config; the tool
//! never persists it.

use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use zeroize::Zeroizing;

/// Environment variable holding the 64-character hex secret key
pub const SECRETS_KEY_ENV: &str = "SECRETS_KEY";

/// Directory under the project root where the vault keeps its files
pub const SECRETS_DIR_NAME: &str = "secrets";

/// Subdirectory holding the plaintext files to protect
pub const SOURCE_DIR_NAME: &str = "files";

/// Subdirectory the blob is decrypted into
pub const DECRYPTED_DIR_NAME: &str = "files-dec";

/// File name of the encrypted blob
pub const ENCRYPTED_FILE_NAME: &str = "secrets.enc";

/// Resolved paths and key material for one invocation
#[derive(Debug, Clone)]
pub struct Config {
    /// Project root (usually the current working directory)
    pub project_root: PathBuf,

    /// Backend project root, receives the decrypted `.env.be`
    pub backend_root: PathBuf,

    /// Vault working directory (`<root>/secrets`)
    pub secrets_dir: PathBuf,

    /// Plaintext source directory (`<root>/secrets/files`)
    pub source_dir: PathBuf,

    /// Decryption destination (`<root>/secrets/files-dec`)
    pub decrypted_dir: PathBuf,

    /// Encrypted blob path (`<root>/secrets/secrets.enc`)
    pub encrypted_file: PathBuf,

    /// SSH directory receiving keys and known_hosts (`~/.ssh`)
    pub ssh_dir: PathBuf,

    /// Hex-encoded secret key; empty when `SECRETS_KEY` is unset
    pub secret_key: Zeroizing<String>,
}

impl Config {
    /// Build a config rooted at `project_root`, reading the key from the
    /// `SECRETS_KEY` environment variable.
    pub fn from_env(project_root: PathBuf) -> Result<Self> {
        let key = env::var(SECRETS_KEY_ENV).unwrap_or_default();
        Self::new(project_root, key)
    }

    /// Build a config with an explicit key (used by tests and callers that
    /// source the key themselves).
    pub fn new(project_root: PathBuf, secret_key: String) -> Result<Self> {
        let secrets_dir = project_root.join(SECRETS_DIR_NAME);
        let ssh_dir = dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".ssh");

        Ok(Config {
            backend_root: project_root.join("backend"),
            source_dir: secrets_dir.join(SOURCE_DIR_NAME),
            decrypted_dir: secrets_dir.join(DECRYPTED_DIR_NAME),
            encrypted_file: secrets_dir.join(ENCRYPTED_FILE_NAME),
            project_root,
            secrets_dir,
            ssh_dir,
            secret_key: Zeroizing::new(secret_key),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derived_from_root() {
        let config = Config::new(PathBuf::from("/tmp/proj"), String::new()).unwrap();

        assert_eq!(config.secrets_dir, PathBuf::from("/tmp/proj/secrets"));
        assert_eq!(config.source_dir, PathBuf::from("/tmp/proj/secrets/files"));
        assert_eq!(
            config.decrypted_dir,
            PathBuf::from("/tmp/proj/secrets/files-dec")
        );
        assert_eq!(
            config.encrypted_file,
            PathBuf::from("/tmp/proj/secrets/secrets.enc")
        );
        assert_eq!(config.backend_root, PathBuf::from("/tmp/proj/backend"));
        assert!(config.ssh_dir.ends_with(".ssh"));
    }
}
