use super::context::AppContext;
use super::prompts;
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_explorer_config::{mask_secret, Config};
use serde_json::json;

pub async fn run_config(ctx: &AppContext, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(ctx, full, output),
        ConfigCommands::SetToken { token } => set_token(ctx, token, output),
        ConfigCommands::Init { force } => init_config(ctx, force, output),
    }
}

fn show_config(ctx: &AppContext, full: bool, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();
    let config = &ctx.config;
    let token = ctx.credentials()?.resolve_tmdb_access_token();
    let token_display = match &token {
        Some(token) if full => token.clone(),
        Some(token) => mask_secret(token),
        None => "not set".to_string(),
    };

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "api": {
                "base_url": config.api.base_url,
                "image_base_url": config.api.image_base_url,
                "language": config.api.language,
                "region": config.api.region,
                "request_timeout_secs": config.api.request_timeout_secs,
                "search_timeout_secs": config.api.search_timeout_secs,
                "access_token": token_display,
            },
            "history": { "max_entries": config.history.max_entries },
            "storage_dir": ctx.paths.storage_dir().display().to_string(),
        }));
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!("No config file at {}, using defaults", config_file.display()));
        output.info("Run 'movie-explorer config init' to write one.");
    }

    output.key_values(
        "Files",
        &[
            ("Config file", config_file.display().to_string()),
            ("Credentials", ctx.paths.credentials_file().display().to_string()),
            ("Storage", ctx.paths.storage_dir().display().to_string()),
        ],
    );
    output.key_values(
        "Metadata API",
        &[
            ("Base URL", config.api.base_url.clone()),
            ("Images", config.api.image_base_url.clone()),
            ("Language", config.api.language.clone()),
            ("Region", config.api.region.clone()),
            ("Request timeout", format!("{}s", config.api.request_timeout_secs)),
            ("Search timeout", format!("{}s", config.api.search_timeout_secs)),
            ("Access token", token_display),
        ],
    );
    output.key_values(
        "Search history",
        &[("Max entries", config.history.max_entries.to_string())],
    );
    Ok(())
}

fn set_token(ctx: &AppContext, token: Option<String>, output: &Output) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => prompts::prompt_password("TMDB API read access token")?,
    };
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(eyre!("Access token cannot be empty"));
    }

    let mut store = ctx.credentials()?;
    store.set_tmdb_access_token(token);
    store
        .save()
        .map_err(|e| eyre!("Failed to save credentials to {}: {}", ctx.paths.credentials_file().display(), e))?;
    output.success(format!("Access token saved to {}", ctx.paths.credentials_file().display()));
    Ok(())
}

fn init_config(ctx: &AppContext, force: bool, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();
    if config_file.exists()
        && !force
        && !prompts::prompt_yes_no(output, &format!("Overwrite {}?", config_file.display()), false)?
    {
        output.info("Keeping the existing configuration");
        return Ok(());
    }

    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_file.display(), e))?;
    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}
