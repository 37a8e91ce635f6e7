//! Error types for secrets-vault

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for secrets-vault
#[derive(Error, Debug)]
pub enum Error {
    // Key errors
    #[error("Invalid secret key: {0}")]
    InvalidKey(String),

    // Crypto errors
    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Decryption error: {0}")]
    Decryption(String),

    #[error("Authentication failed: blob was tampered with or the key is wrong")]
    Authentication,

    // Vault errors
    #[error("Source directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("No files to encrypt in: {}", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("Encrypted file not found: {}", .0.display())]
    EncryptedFileNotFound(PathBuf),

    #[error("Required file missing: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Home directory could not be determined")]
    NoHomeDir,

    // Archive errors
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    // Prompt errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}
