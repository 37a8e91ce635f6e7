//! Cryptography module for secrets-vault
//!
//! Provides the AES-256-GCM file primitive behind the vault. The blob
//! layout is fixed so artifacts stay readable by other implementations:
//! a 16-byte IV, then the 16-byte GCM tag, then the ciphertext.

mod encryption;
mod keys;

pub use encryption::{decrypt_file, encrypt_file};
pub use keys::{decode_secret_key, gen_secret_key, is_secret_key_valid};

/// Size of AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Size of the GCM IV in bytes (16, not the usual 12, for blob compatibility)
pub const IV_SIZE: usize = 16;

/// Size of the GCM authentication tag in bytes
pub const TAG_SIZE: usize = 16;

/// Combined size of the IV and tag prefix of a blob
pub const HEADER_SIZE: usize = IV_SIZE + TAG_SIZE;
