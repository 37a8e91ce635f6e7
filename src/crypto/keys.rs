//! Secret key generation and validation
//!
//! Keys are 32 random bytes, handled as 64-character lowercase hex strings
//! so they can live in a single CI secret. Validation rejects non-hex input
//! outright instead of letting a malformed key truncate silently at decode
//! time.

use crate::crypto::KEY_SIZE;
use crate::error::{Error, Result};
use rand::RngCore;
use zeroize::Zeroizing;

/// Generate a fresh 32-byte key, hex-encoded
pub fn gen_secret_key() -> String {
    let mut key = [0u8; KEY_SIZE];
    rand::thread_rng().fill_bytes(&mut key);
    hex::encode(key)
}

/// Decode a hex key string into raw key bytes
pub fn decode_secret_key(key: &str) -> Result<Zeroizing<[u8; KEY_SIZE]>> {
    if key.len() != KEY_SIZE * 2 {
        return Err(Error::InvalidKey(format!(
            "expected {} hex characters, got {}",
            KEY_SIZE * 2,
            key.len()
        )));
    }

    let mut bytes = Zeroizing::new([0u8; KEY_SIZE]);
    hex::decode_to_slice(key, bytes.as_mut())
        .map_err(|e| Error::InvalidKey(e.to_string()))?;

    Ok(bytes)
}

/// Check whether a key string decodes to a full 32-byte key
pub fn is_secret_key_valid(key: &str) -> bool {
    decode_secret_key(key).is_ok()
}
