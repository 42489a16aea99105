//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use shop_api::{ApiClient, ApiConfig};
use shop_cart::CartStore;

use crate::config::{apply_base_url_override, ShopConfig, BASE_URL_ENV, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Parsed configuration file (defaults when none was found).
    pub config: ShopConfig,
    /// Where the configuration came from.
    pub config_path: Option<PathBuf>,
    /// API settings after variant and environment overrides.
    pub api: ApiConfig,
    /// Selected deployment variant.
    pub variant: Option<String>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Skip confirmation prompts.
    pub assume_yes: bool,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        variant: Option<String>,
        assume_yes: bool,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (ShopConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (ShopConfig::load(&path)?, Some(path)),
                None => (ShopConfig::default(), None),
            },
        };

        let api = config.api_for(variant.as_deref())?;
        let api = apply_base_url_override(api, std::env::var(BASE_URL_ENV).ok());

        Ok(Self {
            config,
            config_path,
            api,
            variant,
            output,
            cwd,
            assume_yes,
        })
    }

    /// Build an API client for the resolved settings.
    pub fn client(&self) -> Result<ApiClient> {
        ApiClient::new(self.api.clone()).context("Failed to create API client")
    }

    /// Build a cart store over a fresh client.
    pub fn store(&self) -> Result<CartStore> {
        Ok(CartStore::new(self.client()?))
    }

    /// Ask before a destructive action. `--yes` answers for the user;
    /// JSON mode never prompts and requires `--yes`.
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        if self.output.is_json() {
            anyhow::bail!("Refusing to prompt in JSON mode; pass --yes to confirm");
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .context("Failed to read confirmation")
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

/// Find a config file in `start` or its ancestors.
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".shop.toml"), "").unwrap();

        assert_eq!(find_config(&nested), Some(root.path().join(".shop.toml")));
    }

    #[test]
    fn test_find_config_prefers_first_name() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("shop.json"), "{}").unwrap();
        std::fs::write(root.path().join("shop.toml"), "").unwrap();

        assert_eq!(find_config(root.path()), Some(root.path().join("shop.toml")));
    }

    #[test]
    fn test_resolve() {
        let cwd = Path::new("/work");
        assert_eq!(resolve(cwd, "img/mug.png"), PathBuf::from("/work/img/mug.png"));
        assert_eq!(resolve(cwd, "/tmp/mug.png"), PathBuf::from("/tmp/mug.png"));
    }
}
