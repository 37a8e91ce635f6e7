//! Directory <-> encrypted blob lifecycle
//!
//! Three independent operations plus key generation. Each one either fully
//! succeeds or leaves the destination untouched: the blob is written last
//! during encrypt, decryption happens into a temp file before extraction,
//! and `prepare_cicd` validates every required file before copying any.

use crate::archive;
use crate::config::{Config, SECRETS_KEY_ENV};
use crate::crypto;
use crate::error::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Files `prepare_cicd` expects inside the decrypted directory
const REQUIRED_CICD_FILES: [&str; 5] = [".env", ".env.be", "id_rsa", "id_rsa.pub", "known_hosts"];

/// Orchestrates encrypt/decrypt/CI-prep over a fixed set of paths
pub struct SecretsTool {
    config: Config,
}

impl SecretsTool {
    pub fn new(config: Config) -> Self {
        SecretsTool { config }
    }

    /// Zip the source directory and encrypt it into the blob
    pub fn encrypt(&self) -> Result<()> {
        let source_dir = &self.config.source_dir;
        if !source_dir.is_dir() {
            return Err(Error::DirectoryNotFound(source_dir.clone()));
        }

        let files = list_file_names(source_dir)?;
        if files.is_empty() {
            return Err(Error::EmptyDirectory(source_dir.clone()));
        }

        info!("Encrypting {} files: {:?}", files.len(), files);

        fs::create_dir_all(&self.config.secrets_dir)?;

        // NamedTempFile removes the zip on drop, including error paths
        let temp_zip = self.temp_zip()?;
        archive::create_zip(source_dir, temp_zip.path())?;
        crypto::encrypt_file(
            temp_zip.path(),
            &self.config.encrypted_file,
            &self.config.secret_key,
        )?;

        info!(
            "Encrypted blob written to {}",
            self.config.encrypted_file.display()
        );
        Ok(())
    }

    /// Decrypt the blob and unpack it into the decrypted directory
    pub fn decrypt(&self) -> Result<()> {
        let encrypted_file = &self.config.encrypted_file;
        if !encrypted_file.is_file() {
            return Err(Error::EncryptedFileNotFound(encrypted_file.clone()));
        }

        let temp_zip = self.temp_zip()?;
        crypto::decrypt_file(encrypted_file, temp_zip.path(), &self.config.secret_key)?;

        // Only recreate the destination once the blob has authenticated
        let decrypted_dir = &self.config.decrypted_dir;
        if decrypted_dir.exists() {
            fs::remove_dir_all(decrypted_dir)?;
        }
        archive::extract_zip(temp_zip.path(), decrypted_dir)?;

        let files = list_file_names(decrypted_dir)?;
        info!(
            "Decrypted {} files into {}: {:?}",
            files.len(),
            decrypted_dir.display(),
            files
        );
        Ok(())
    }

    /// Distribute decrypted files into the places a CI job needs them
    ///
    /// All five required files are checked before anything is copied, so a
    /// missing file cannot leave a half-configured environment behind.
    /// `known_hosts` is appended to `~/.ssh/known_hosts` (with a newline
    /// separator) instead of overwriting it, to keep hosts trusted by the
    /// runner image.
    pub fn prepare_cicd(&self) -> Result<()> {
        let decrypted_dir = &self.config.decrypted_dir;
        let sources: Vec<PathBuf> = REQUIRED_CICD_FILES
            .iter()
            .map(|name| decrypted_dir.join(name))
            .collect();

        for source in &sources {
            if !source.is_file() {
                return Err(Error::MissingFile(source.clone()));
            }
        }

        let [env, env_be, id_rsa, id_rsa_pub, known_hosts] = &sources[..] else {
            return Err(Error::Internal("required file list mismatch".to_string()));
        };

        fs::create_dir_all(&self.config.backend_root)?;
        fs::create_dir_all(&self.config.ssh_dir)?;

        fs::copy(env, self.config.project_root.join(".env"))?;
        fs::copy(env_be, self.config.backend_root.join(".env"))?;
        fs::copy(id_rsa, self.config.ssh_dir.join("id_rsa"))?;
        fs::copy(id_rsa_pub, self.config.ssh_dir.join("id_rsa.pub"))?;

        append_known_hosts(known_hosts, &self.config.ssh_dir.join("known_hosts"))?;

        info!("CI/CD environment prepared");
        Ok(())
    }

    /// Generate a key and print the command that stores it as a CI secret
    pub fn generate_key(&self) -> Result<()> {
        let key = crypto::gen_secret_key();
        println!("Generated key: {key}");
        println!("Set it as a CI secret with:");
        println!();
        println!("gh secret set {SECRETS_KEY_ENV} --body \"{key}\"");
        println!();
        Ok(())
    }

    fn temp_zip(&self) -> Result<NamedTempFile> {
        fs::create_dir_all(&self.config.secrets_dir)?;
        let temp = tempfile::Builder::new()
            .prefix("secrets-")
            .suffix(".zip")
            .tempfile_in(&self.config.secrets_dir)?;
        Ok(temp)
    }
}

fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

fn append_known_hosts(source: &Path, target: &Path) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(target)?;
    // separator so the appended block cannot merge with an existing last line
    file.write_all(b"\n")?;
    file.write_all(&fs::read(source)?)?;
    Ok(())
}
