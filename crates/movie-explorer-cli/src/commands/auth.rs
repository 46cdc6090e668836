use super::context::AppContext;
use super::prompts;
use crate::output::Output;
use crate::ProfileCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movie_explorer_core::{Authenticator, CollectionKind, ProfileUpdate};
use movie_explorer_models::User;
use serde_json::json;

fn print_user(user: &User, output: &Output) {
    if !output.is_human() {
        output.json(&json!({ "user": user }));
        return;
    }
    let mut rows = vec![
        ("Name", user.name.clone()),
        ("Email", user.email.clone()),
        ("ID", user.id.clone()),
    ];
    if let Some(avatar) = &user.avatar {
        rows.push(("Avatar", avatar.clone()));
    }
    output.key_values("Profile", &rows);
}

pub async fn run_login(ctx: &AppContext, email: Option<String>, remember: bool, output: &Output) -> Result<()> {
    let auth = ctx.authenticator();
    let remembered = auth.remembered_email();
    let email = prompts::prompt_string(output, "Email", email, remembered.as_deref())?;
    let password = prompts::prompt_password("Password")?;

    let user = {
        let _spinner = output.spinner("Signing in...");
        auth.login(&email, &password, remember).await
    }?;
    output.success(format!("Welcome back, {}!", user.name));
    Ok(())
}

pub async fn run_register(ctx: &AppContext, name: Option<String>, email: Option<String>, output: &Output) -> Result<()> {
    let auth = ctx.authenticator();
    let name = prompts::prompt_string(output, "Name", name, None)?;
    let email = prompts::prompt_string(output, "Email", email, None)?;
    let password = prompts::prompt_password("Password")?;
    let confirm = prompts::prompt_password("Confirm password")?;
    if password != confirm {
        return Err(eyre!("Passwords do not match"));
    }

    let user = {
        let _spinner = output.spinner("Creating account...");
        auth.register(&name, &email, &password).await
    }?;
    output.success(format!("Account created. Welcome, {}!", user.name));
    Ok(())
}

pub async fn run_logout(ctx: &AppContext, output: &Output) -> Result<()> {
    let auth = ctx.authenticator();
    if !auth.is_authenticated() {
        output.info("You are not signed in");
        return Ok(());
    }
    auth.logout()?;
    output.success("Signed out");
    Ok(())
}

pub async fn run_profile(ctx: &AppContext, cmd: Option<ProfileCommands>, output: &Output) -> Result<()> {
    let auth = ctx.authenticator();
    match cmd.unwrap_or(ProfileCommands::Show) {
        ProfileCommands::Show => {
            let user = auth
                .current_user()
                .ok_or_else(|| eyre!("Not signed in. Run 'movie-explorer login' first"))?;
            print_user(&user, output);

            let collections = ctx.collections();
            output.info(format!(
                "{} movies in watchlist, {} favorites",
                collections.len(CollectionKind::Watchlist),
                collections.len(CollectionKind::Favorites)
            ));
        }
        ProfileCommands::Update { name, email, avatar } => {
            if name.is_none() && email.is_none() && avatar.is_none() {
                output.warn("Nothing to update. Use --name, --email or --avatar");
                return Ok(());
            }
            let user = {
                let _spinner = output.spinner("Updating profile...");
                auth.update_profile(ProfileUpdate { name, email, avatar }).await
            }?;
            output.success("Profile updated");
            print_user(&user, output);
        }
    }
    Ok(())
}
