//! Configuration management commands.

use std::path::PathBuf;

use anyhow::{bail, Result};
use dental_observability::{LogFormat, LogLevel};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx),
        ConfigCommand::Init { project, force } => init_config(project, force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.warn("No config file found; showing defaults"),
    }

    let config = &ctx.config;
    ctx.output.info("");
    ctx.output.info("[site]");
    ctx.output.kv("name", &config.site.name);
    ctx.output.kv("origin", &config.site.origin);

    ctx.output.info("");
    ctx.output.info("[firebase]");
    ctx.output.kv("project_id", &config.firebase.project_id);
    ctx.output.kv("database", &config.firebase.database);
    ctx.output.kv("functions", &config.firebase.functions_origin());
    ctx.output.kv(
        "api_key",
        if config.firebase.api_key.is_some() { "(set)" } else { "(not set)" },
    );

    ctx.output.info("");
    ctx.output.info("[stripe]");
    ctx.output.kv(
        "publishable_key",
        config.stripe.publishable_key.as_deref().unwrap_or("(not set)"),
    );
    ctx.output.kv(
        "portal_login_url",
        config.stripe.portal_login_url.as_deref().unwrap_or("(not set)"),
    );

    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv(
        "source",
        config.catalog.products_file.as_deref().unwrap_or("firestore"),
    );
    ctx.output
        .kv("retry_attempts", &config.catalog.retry_attempts.to_string());
    ctx.output.kv("per_page", &config.catalog.per_page.to_string());

    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &config.logging.level.to_string());
    ctx.output.kv("format", &format!("{:?}", config.logging.format).to_lowercase());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        println!("{}", value);
    }

    Ok(())
}

fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let Some(path) = ctx.config_path.clone() else {
        bail!("No config file found. Run `dental config init` to create one.");
    };

    let mut config = StorefrontConfig::load(&path)?;
    set_config_value(&mut config, key, value)?;
    config.save(&path)?;

    ctx.output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

fn init_config(project: Option<String>, force: bool, ctx: &Context) -> Result<()> {
    let path: PathBuf = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    let project = project.unwrap_or_else(|| {
        ctx.cwd
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("dental-storefront")
            .to_string()
    });

    std::fs::write(&path, generate_default_config(&project))?;
    ctx.output.success(&format!("Created: {}", path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let (errors, warnings) = ctx.config.validate();

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

fn optional(value: &Option<String>) -> serde_json::Value {
    value
        .as_ref()
        .map(|v| serde_json::Value::String(v.clone()))
        .unwrap_or(serde_json::Value::Null)
}

fn get_config_value(config: &StorefrontConfig, key: &str) -> Result<serde_json::Value> {
    let parts: Vec<&str> = key.split('.').collect();

    Ok(match parts.as_slice() {
        ["site", "name"] => config.site.name.clone().into(),
        ["site", "origin"] => config.site.origin.clone().into(),
        ["firebase", "project_id"] => config.firebase.project_id.clone().into(),
        ["firebase", "database"] => config.firebase.database.clone().into(),
        ["firebase", "functions_region"] => config.firebase.functions_region.clone().into(),
        ["firebase", "functions_url"] => optional(&config.firebase.functions_url),
        ["stripe", "publishable_key"] => optional(&config.stripe.publishable_key),
        ["stripe", "portal_login_url"] => optional(&config.stripe.portal_login_url),
        ["catalog", "products_file"] => optional(&config.catalog.products_file),
        ["catalog", "retry_attempts"] => config.catalog.retry_attempts.into(),
        ["catalog", "per_page"] => config.catalog.per_page.into(),
        ["logging", "level"] => config.logging.level.to_string().into(),
        ["logging", "format"] => serde_json::to_value(config.logging.format)?,
        _ => bail!("Unknown config key: {}", key),
    })
}

/// Empty strings clear optional values.
fn set_optional(target: &mut Option<String>, value: &str) {
    *target = if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    };
}

fn set_config_value(config: &mut StorefrontConfig, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["site", "name"] => config.site.name = value.to_string(),
        ["site", "origin"] => config.site.origin = value.trim_end_matches('/').to_string(),
        ["firebase", "project_id"] => config.firebase.project_id = value.to_string(),
        ["firebase", "database"] => config.firebase.database = value.to_string(),
        ["firebase", "functions_region"] => config.firebase.functions_region = value.to_string(),
        ["firebase", "functions_url"] => set_optional(&mut config.firebase.functions_url, value),
        ["firebase", "api_key"] => set_optional(&mut config.firebase.api_key, value),
        ["stripe", "publishable_key"] => set_optional(&mut config.stripe.publishable_key, value),
        ["stripe", "portal_login_url"] => set_optional(&mut config.stripe.portal_login_url, value),
        ["catalog", "products_file"] => set_optional(&mut config.catalog.products_file, value),
        ["catalog", "retry_attempts"] => config.catalog.retry_attempts = value.parse()?,
        ["catalog", "per_page"] => config.catalog.per_page = value.parse()?,
        ["logging", "level"] => config.logging.level = value.parse::<LogLevel>()?,
        ["logging", "format"] => config.logging.format = value.parse::<LogFormat>()?,
        _ => bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let mut config = StorefrontConfig::default();
        set_config_value(&mut config, "firebase.project_id", "dental-demo").unwrap();
        set_config_value(&mut config, "site.origin", "https://shop.example/").unwrap();
        set_config_value(&mut config, "logging.format", "json").unwrap();
        set_config_value(&mut config, "catalog.retry_attempts", "5").unwrap();

        assert_eq!(
            get_config_value(&config, "firebase.project_id").unwrap(),
            "dental-demo"
        );
        assert_eq!(get_config_value(&config, "site.origin").unwrap(), "https://shop.example");
        assert_eq!(get_config_value(&config, "logging.format").unwrap(), "json");
        assert_eq!(get_config_value(&config, "catalog.retry_attempts").unwrap(), 5);
        assert!(get_config_value(&config, "stripe.portal_login_url").unwrap().is_null());
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = StorefrontConfig::default();
        assert!(set_config_value(&mut config, "catalog.per_page", "many").is_err());
        assert!(set_config_value(&mut config, "logging.level", "loud").is_err());
        assert!(set_config_value(&mut config, "nope", "x").is_err());
    }

    #[test]
    fn test_empty_clears_optional() {
        let mut config = StorefrontConfig::default();
        set_config_value(&mut config, "stripe.publishable_key", "pk_test_1").unwrap();
        set_config_value(&mut config, "stripe.publishable_key", "").unwrap();
        assert_eq!(config.stripe.publishable_key, None);
    }
}
