use crate::output::Output;
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use std::io::{self, BufRead};

fn read_line() -> Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line).wrap_err("Failed to read from stdin")?;
    Ok(line.trim().to_string())
}

/// Use `value` when given, otherwise ask for it. An empty answer falls back
/// to `default`.
pub fn prompt_string(output: &Output, label: &str, value: Option<String>, default: Option<&str>) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    match default {
        Some(default) => output.print(format!("{} [{}]: ", label, default))?,
        None => output.print(format!("{}: ", label))?,
    }
    let answer = read_line()?;
    if answer.is_empty() {
        return default
            .map(str::to_string)
            .ok_or_else(|| eyre!("{} is required", label));
    }
    Ok(answer)
}

pub fn prompt_password(label: &str) -> Result<String> {
    rpassword::prompt_password(format!("{}: ", label)).wrap_err("Failed to read password")
}

pub fn prompt_yes_no(output: &Output, label: &str, default: bool) -> Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    output.print(format!("{} [{}]: ", label, hint))?;
    Ok(parse_yes_no(&read_line()?).unwrap_or(default))
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
