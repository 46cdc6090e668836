use super::context::AppContext;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_explorer_core::storage::keys;

pub async fn run_clear(ctx: &AppContext, all: bool, storage: bool, credentials: bool, output: &Output) -> Result<()> {
    if all {
        clear_storage(ctx, output)?;
        clear_credentials(ctx, output)?;
        output.success("All local data and credentials cleared");
        return Ok(());
    }

    let mut cleared_anything = false;

    if storage {
        clear_storage(ctx, output)?;
        cleared_anything = true;
    }

    if credentials {
        clear_credentials(ctx, output)?;
        cleared_anything = true;
    }

    if !cleared_anything {
        output.warn("No clear option specified. Use --storage, --credentials, or --all");
        output.println("\nExample: movie-explorer clear --storage");
    }

    Ok(())
}

/// Session, watchlist, favorites, search history and theme
fn clear_storage(ctx: &AppContext, output: &Output) -> Result<()> {
    let stored = keys::ALL.iter().filter(|key| ctx.storage().contains(key)).count();
    if stored == 0 {
        output.info("No local data found to clear");
        return Ok(());
    }
    ctx.storage().clear_all()?;
    output.success(format!("Cleared {} stored entries from {}", stored, ctx.paths.storage_dir().display()));
    Ok(())
}

fn clear_credentials(ctx: &AppContext, output: &Output) -> Result<()> {
    let credentials_file = ctx.paths.credentials_file();
    if !credentials_file.exists() {
        output.info("No credentials found to clear");
        return Ok(());
    }
    std::fs::remove_file(&credentials_file)
        .map_err(|e| eyre!("Failed to remove credentials at {}: {}", credentials_file.display(), e))?;
    output.success(format!("Cleared credentials: {}", credentials_file.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use movie_explorer_config::{Config, PathManager};
    use movie_explorer_core::CollectionKind;

    #[tokio::test]
    async fn test_clear_storage_removes_every_key() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::new(PathManager::from_base(dir.path()), Config::default()).unwrap();
        let output = Output::new(OutputFormat::Human, true);

        let movie = serde_json::from_str(r#"{"id": 1, "title": "Alien"}"#).unwrap();
        ctx.collections().add(CollectionKind::Favorites, movie).unwrap();
        ctx.history().record("alien", None, Some(1)).unwrap();

        run_clear(&ctx, false, true, false, &output).await.unwrap();
        assert!(ctx.collections().is_empty(CollectionKind::Favorites));
        assert!(ctx.history().is_empty());
    }
}
