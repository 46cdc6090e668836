use super::context::AppContext;
use crate::output::Output;
use crate::ThemeCommands;
use color_eyre::Result;
use serde_json::json;

pub async fn run_theme(ctx: &AppContext, cmd: Option<ThemeCommands>, output: &Output) -> Result<()> {
    let theme = ctx.theme();
    let mode = match cmd.unwrap_or(ThemeCommands::Show) {
        ThemeCommands::Show => theme.mode(),
        ThemeCommands::Toggle => {
            let mode = theme.toggle()?;
            output.success(format!("Switched to {} mode", mode));
            mode
        }
        ThemeCommands::Set { mode } => {
            theme.set(mode)?;
            output.success(format!("Theme set to {} mode", mode));
            mode
        }
    };

    if output.is_human() {
        output.info(format!("Current theme: {}", mode));
    } else {
        output.json(&json!({ "theme": mode }));
    }
    Ok(())
}
