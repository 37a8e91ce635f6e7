//! secrets-vault - encrypted secrets management for CI/CD
//!
//! This library packs a directory of sensitive files into a single
//! AES-256-GCM encrypted blob that can be committed to version control,
//! and unpacks it again on CI runners using one `SECRETS_KEY` secret.

pub mod archive;
pub mod config;
pub mod crypto;
pub mod error;
pub mod vault;

pub use config::Config;
pub use error::{Error, Result};
