//! AES-256-GCM file encryption
//!
//! Blob layout: `iv || tag || ciphertext` at fixed offsets ([0:16], [16:32],
//! [32:]). GCM is a stream mode, so ciphertext length equals plaintext
//! length and the whole blob is exactly 32 bytes longer than the input.
//!
//! The IV is 16 bytes rather than GCM's native 12; the cipher derives the
//! counter block through GHASH as the GCM spec defines for non-96-bit IVs,
//! which keeps blobs interoperable with OpenSSL-based tooling.
//!
//! Files are processed whole in memory. The inputs here are zipped secrets
//! directories, a few kilobytes at most.

use crate::crypto::{decode_secret_key, HEADER_SIZE, IV_SIZE, KEY_SIZE};
use crate::error::{Error, Result};
use aes::Aes256;
use aes_gcm::aead::generic_array::typenum::U16;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{AesGcm, Nonce, Tag};
use rand::RngCore;
use std::fs;
use std::path::Path;

/// AES-256-GCM with a 16-byte IV
type Cipher = AesGcm<Aes256, U16>;

/// Encrypt a file into a blob, overwriting `output`
///
/// Fails with `InvalidKey` before touching the filesystem if the key does
/// not decode. A fresh random IV is generated per call, so encrypting the
/// same input twice yields different blobs.
pub fn encrypt_file(input: &Path, output: &Path, key: &str) -> Result<()> {
    let key = decode_secret_key(key)?;
    let plaintext = fs::read(input)?;
    let blob = encrypt(&key, &plaintext)?;
    fs::write(output, blob)?;
    Ok(())
}

/// Decrypt a blob back into a plaintext file
///
/// The output is written only after the authentication tag verifies, so a
/// failed decrypt never leaves partial plaintext behind.
pub fn decrypt_file(input: &Path, output: &Path, key: &str) -> Result<()> {
    let key = decode_secret_key(key)?;
    let blob = fs::read(input)?;
    let plaintext = decrypt(&key, &blob)?;
    fs::write(output, plaintext)?;
    Ok(())
}

fn encrypt(key: &[u8; KEY_SIZE], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Cipher::new_from_slice(key.as_ref())
        .map_err(|_| Error::Encryption("Failed to create encryption key".to_string()))?;

    let mut iv = [0u8; IV_SIZE];
    rand::thread_rng().fill_bytes(&mut iv);

    let mut ciphertext = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&iv), &[], &mut ciphertext)
        .map_err(|_| Error::Encryption("Encryption failed".to_string()))?;

    let mut blob = Vec::with_capacity(HEADER_SIZE + ciphertext.len());
    blob.extend_from_slice(&iv);
    blob.extend_from_slice(tag.as_slice());
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

fn decrypt(key: &[u8; KEY_SIZE], blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < HEADER_SIZE {
        return Err(Error::Decryption(format!(
            "Blob too short: {} bytes",
            blob.len()
        )));
    }

    let (iv, rest) = blob.split_at(IV_SIZE);
    let (tag, ciphertext) = rest.split_at(HEADER_SIZE - IV_SIZE);

    let cipher = Cipher::new_from_slice(key.as_ref())
        .map_err(|_| Error::Decryption("Failed to create decryption key".to_string()))?;

    let mut plaintext = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(iv),
            &[],
            &mut plaintext,
            Tag::from_slice(tag),
        )
        .map_err(|_| Error::Authentication)?;

    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::TAG_SIZE;

    fn test_key() -> [u8; KEY_SIZE] {
        let mut key = [0u8; KEY_SIZE];
        rand::thread_rng().fill_bytes(&mut key);
        key
    }

    #[test]
    fn test_encrypt_decrypt() {
        let key = test_key();
        let plaintext = b"FOO=bar\n";

        let blob = encrypt(&key, plaintext).unwrap();
        let decrypted = decrypt(&key, &blob).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_blob_layout() {
        let key = test_key();
        let plaintext = b"FOO=bar\n";

        let blob = encrypt(&key, plaintext).unwrap();

        // iv || tag || ciphertext, stream mode: ciphertext len == plaintext len
        assert_eq!(blob.len(), IV_SIZE + TAG_SIZE + plaintext.len());
    }

    #[test]
    fn test_fresh_iv_per_call() {
        let key = test_key();
        let plaintext = b"same input";

        let blob1 = encrypt(&key, plaintext).unwrap();
        let blob2 = encrypt(&key, plaintext).unwrap();

        assert_ne!(blob1, blob2);
        assert_eq!(decrypt(&key, &blob1).unwrap(), decrypt(&key, &blob2).unwrap());
    }

    #[test]
    fn test_tamper_detected_in_every_region() {
        let key = test_key();
        let blob = encrypt(&key, b"Secret data").unwrap();

        // one flipped bit in the IV, tag, and ciphertext regions respectively
        for index in [0, IV_SIZE, HEADER_SIZE] {
            let mut tampered = blob.clone();
            tampered[index] ^= 0x01;

            match decrypt(&key, &tampered) {
                Err(Error::Authentication) => {}
                other => panic!("expected Authentication, got {:?}", other.map(|_| ())),
            }
        }
    }

    #[test]
    fn test_wrong_key_fails() {
        let key1 = test_key();
        let key2 = test_key();

        let blob = encrypt(&key1, b"Secret data").unwrap();
        assert!(matches!(decrypt(&key2, &blob), Err(Error::Authentication)));
    }

    #[test]
    fn test_truncated_blob_fails() {
        let key = test_key();
        assert!(matches!(
            decrypt(&key, &[0u8; HEADER_SIZE - 1]),
            Err(Error::Decryption(_))
        ));
    }

    #[test]
    fn test_empty_plaintext() {
        let key = test_key();
        let blob = encrypt(&key, b"").unwrap();

        assert_eq!(blob.len(), HEADER_SIZE);
        assert_eq!(decrypt(&key, &blob).unwrap(), b"");
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("plain.zip");
        let encrypted = dir.path().join("secrets.enc");
        let restored = dir.path().join("restored.zip");

        fs::write(&input, b"not really a zip").unwrap();
        let key = crate::crypto::gen_secret_key();

        encrypt_file(&input, &encrypted, &key).unwrap();
        decrypt_file(&encrypted, &restored, &key).unwrap();

        assert_eq!(fs::read(&restored).unwrap(), b"not really a zip");
    }

    #[test]
    fn test_invalid_key_rejected_before_io() {
        let missing = Path::new("/nonexistent/input");
        let result = encrypt_file(missing, missing, "too-short");
        assert!(matches!(result, Err(Error::InvalidKey(_))));
    }
}
