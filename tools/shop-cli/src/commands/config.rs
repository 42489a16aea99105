//! Configuration management commands.

use anyhow::{bail, Result};
use shop_api::{Resource, DEFAULT_BASE_URL};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, ShopConfig, BASE_URL_ENV, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { base_url, force } => init_config(base_url.as_deref(), force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "file": ctx.config_path,
            "variant": ctx.variant,
            "api": ctx.api,
            "log": ctx.config.log,
        }));
        return Ok(());
    }

    ctx.output.header("Effective Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }
    if let Some(variant) = &ctx.variant {
        ctx.output.kv("variant", variant);
    }

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.api.base_url);
    ctx.output.kv("envelope", &ctx.api.envelope.to_string());
    ctx.output.kv("currency", ctx.api.currency.code());

    let endpoints = ctx.api.endpoints();
    for resource in Resource::ALL {
        ctx.output.kv(resource.path(), &endpoints.url(resource, ""));
    }

    ctx.output.info("[log]");
    ctx.output.kv("level", &ctx.config.log.level.to_string());
    ctx.output.kv("format", &format!("{:?}", ctx.config.log.format).to_lowercase());

    let variants = ctx.config.variant_names();
    if !variants.is_empty() {
        ctx.output.info("Variants:");
        for name in &variants {
            ctx.output.list_item(name);
        }
    }

    Ok(())
}

fn init_config(base_url: Option<&str>, force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = generate_default_config(base_url.unwrap_or(DEFAULT_BASE_URL));
    // Refuse to write something the loader would reject.
    toml::from_str::<ShopConfig>(&content)?;
    std::fs::write(&config_path, content)?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if ctx.config_path.is_none() {
        warnings.push(format!("No config file found, using defaults ({})", DEFAULT_BASE_URL));
    }

    if let Err(e) = ctx.config.api.validate() {
        errors.push(format!("api: {}", e));
    }

    for name in ctx.config.variant_names() {
        match ctx.config.api_for(Some(&name)) {
            Ok(api) => {
                if let Err(e) = api.validate() {
                    errors.push(format!("variants.{}: {}", name, e));
                }
            }
            Err(e) => errors.push(e.to_string()),
        }
    }

    if std::env::var(BASE_URL_ENV).is_ok() {
        warnings.push(format!("{} overrides api.base_url ({})", BASE_URL_ENV, ctx.api.base_url));
    }

    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
