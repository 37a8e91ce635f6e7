//! Sync local env files into the secrets source directory
//!
//! Keeps `.env.example` templates up to date and copies the real values
//! into `secrets/files/` so the next `encrypt` run picks them up. Frontend
//! variables carry a `VITE_` prefix locally; the synced copy strips it and
//! keeps the prefixed originals at the tail so nothing is lost.

use crate::config::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Prefix stripped from frontend env vars during sync
const FRONTEND_PREFIX: &str = "VITE_";

/// Syncs `.env.local` and `backend/.env` into the vault source directory
pub struct EnvSyncTool {
    config: Config,
}

impl EnvSyncTool {
    pub fn new(config: Config) -> Self {
        EnvSyncTool { config }
    }

    /// Sync env files, prompting before overwriting unless `assume_yes`
    pub fn sync(&self, assume_yes: bool) -> Result<()> {
        let root = &self.config.project_root;
        let env_local = root.join(".env.local");
        let env_be = self.config.backend_root.join(".env");

        fs::create_dir_all(&self.config.source_dir)?;

        if env_local.is_file() {
            gen_env_example(&env_local, &root.join(".env.example"))?;

            let target = self.config.source_dir.join(".env");
            if assume_yes || confirm_overwrite(&target)? {
                let text = fs::read_to_string(&env_local)?;
                fs::write(&target, strip_prefix_lines(&text, FRONTEND_PREFIX))?;
                info!("Synced {}", target.display());
            }
        } else {
            info!("Skipped: {} does not exist", env_local.display());
        }

        if env_be.is_file() {
            gen_env_example(&env_be, &self.config.backend_root.join(".env.example"))?;

            let target = self.config.source_dir.join(".env.be");
            if assume_yes || confirm_overwrite(&target)? {
                fs::copy(&env_be, &target)?;
                info!("Synced {}", target.display());
            }
        } else {
            info!("Skipped: {} does not exist", env_be.display());
        }

        Ok(())
    }
}

/// Write an `.env.example` next to an env file: same layout, values removed
fn gen_env_example(source: &Path, target: &Path) -> Result<()> {
    let text = fs::read_to_string(source)?;
    let example: Vec<&str> = text
        .lines()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.starts_with('#') || trimmed.is_empty() {
                return line;
            }
            match line.find('=') {
                Some(idx) if idx > 0 => &line[..=idx],
                _ => line,
            }
        })
        .collect();

    fs::write(target, example.join("\n"))?;
    info!("Generated {}", target.display());
    Ok(())
}

/// Strip `prefix` from matching assignment lines, appending the originals
/// under a `# prefix:` marker so the file stays reversible
fn strip_prefix_lines(text: &str, prefix: &str) -> String {
    let mut prefixed = Vec::new();

    let mut result: Vec<String> = text
        .lines()
        .map(|line| {
            let trimmed = line.trim();
            if trimmed.starts_with('#') || trimmed.is_empty() || !line.contains('=') {
                return line.to_string();
            }
            if trimmed.starts_with(prefix) {
                prefixed.push(line.to_string());
                return trimmed[prefix.len()..].to_string();
            }
            line.to_string()
        })
        .collect();

    if !prefixed.is_empty() {
        result.push(String::new());
        result.push(format!("# prefix: {prefix}"));
        result.extend(prefixed);
    }

    result.join("\n")
}

fn confirm_overwrite(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }

    dialoguer::Confirm::new()
        .with_prompt(format!("Overwrite {}?", path.display()))
        .default(false)
        .interact()
        .map_err(|e| Error::Prompt(e.to_string()))
}
