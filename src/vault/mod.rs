//! Secrets vault operations
//!
//! The vault packs a directory of sensitive files (.env files, SSH keys,
//! known_hosts) into one encrypted blob that is safe to commit, and turns
//! that blob back into working CI/CD credentials on the other side. A
//! single `SECRETS_KEY` CI secret replaces a pile of per-platform ones.

mod env_sync;
mod tool;

pub use env_sync::EnvSyncTool;
pub use tool::SecretsTool;
