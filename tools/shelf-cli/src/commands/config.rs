//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, ShelfConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { path, force } => init_config(path.as_deref(), force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&redacted(&ctx.config));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = redacted(&ctx.config);
    let text = toml::to_string_pretty(&config).context("Failed to render config")?;
    println!("\n{}", text.trim_end());
    Ok(())
}

fn init_config(path: Option<&str>, force: bool, ctx: &Context) -> Result<()> {
    let target = ctx.resolve_path(path.unwrap_or("shelf.toml"));
    if target.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            target.display()
        );
    }

    fs::write(&target, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", target.display()))?;
    ctx.output.success(&format!("Created {}", target.display()));
    Ok(())
}

/// A copy safe to print: the password is masked.
fn redacted(config: &ShelfConfig) -> ShelfConfig {
    let mut config = config.clone();
    if config.auth.password.is_some() {
        config.auth.password = Some("********".to_string());
    }
    config
}
