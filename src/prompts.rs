//! Interactive collection of servers and targets.
//!
//! A single-server run is stored under the name `gitlab` without asking; a
//! multi-server run asks for each name. The invocation mode is asked once and
//! applies to every server. Tokens are read with a hidden prompt and are never
//! echoed back.

use crate::constants::DEFAULT_SERVER_NAME;
use crate::server::{InvocationMode, ServerRecord, Token, validate_server_name};
use crate::targets::Target;
use anyhow::Result;
use inquire::validator::Validation;
use inquire::{Confirm, MultiSelect, Password, PasswordDisplayMode, Select, Text};

/// Values offered as prompt defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptDefaults {
    /// Host pre-filled for every server
    pub host: String,
    /// Mode selected initially
    pub mode: InvocationMode,
    /// Targets pre-selected in the target list
    pub targets: Vec<Target>,
}

/// Everything an install run needs from the user.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// Servers to configure, in entry order
    pub servers: Vec<ServerRecord>,
    /// Targets every server is written to
    pub targets: Vec<Target>,
}

/// Runs the interactive prompts.
///
/// # Errors
///
/// Returns the prompt error when the user cancels (Esc / Ctrl-C) or the
/// terminal cannot be read.
pub fn collect_interactive(defaults: &PromptDefaults) -> Result<InstallRequest> {
    let multi = Confirm::new("Configure multiple GitLab servers?")
        .with_default(false)
        .prompt()?;

    let mode = prompt_mode(defaults.mode)?;
    let mut servers: Vec<ServerRecord> = Vec::new();

    loop {
        let name = if multi {
            println!("\nServer {}", servers.len() + 1);
            prompt_name(&servers)?
        } else {
            DEFAULT_SERVER_NAME.to_string()
        };

        let host = Text::new("GitLab host:")
            .with_default(&defaults.host)
            .prompt()?;

        let token = Password::new(&format!("GitLab access token for '{name}':"))
            .with_display_mode(PasswordDisplayMode::Hidden)
            .without_confirmation()
            .with_validator(|input: &str| {
                Ok(if input.trim().is_empty() {
                    Validation::Invalid("Token cannot be empty".into())
                } else {
                    Validation::Valid
                })
            })
            .prompt()?;

        let read_only = Confirm::new("Enable read-only mode?")
            .with_default(false)
            .prompt()?;

        servers.push(ServerRecord::new(&name, &host, Token::new(token), read_only, mode)?);

        if !multi || !Confirm::new("Add another server?").with_default(false).prompt()? {
            break;
        }
    }

    let targets = prompt_targets(&defaults.targets)?;
    Ok(InstallRequest {
        servers,
        targets,
    })
}

fn prompt_mode(default: InvocationMode) -> Result<InvocationMode> {
    let options = vec![InvocationMode::Local, InvocationMode::Container];
    let cursor = options.iter().position(|mode| *mode == default).unwrap_or(0);

    Ok(Select::new("How should editors start the server?", options)
        .with_starting_cursor(cursor)
        .prompt()?)
}

fn prompt_name(existing: &[ServerRecord]) -> Result<String> {
    let taken: Vec<String> = existing.iter().map(|record| record.name.clone()).collect();

    let name = Text::new("Server name (e.g. work, personal):")
        .with_validator(move |input: &str| {
            Ok(match check_new_name(input, &taken) {
                Ok(_) => Validation::Valid,
                Err(message) => Validation::Invalid(message.into()),
            })
        })
        .prompt()?;

    Ok(validate_server_name(&name)?)
}

fn prompt_targets(defaults: &[Target]) -> Result<Vec<Target>> {
    let selected = default_indices(defaults);

    Ok(MultiSelect::new("Select environments to configure:", Target::ALL.to_vec())
        .with_default(&selected)
        .with_validator(|chosen: &[inquire::list_option::ListOption<&Target>]| {
            Ok(if chosen.is_empty() {
                Validation::Invalid("Select at least one environment".into())
            } else {
                Validation::Valid
            })
        })
        .prompt()?)
}

/// Validates a name typed for a new server against the names already entered.
pub(crate) fn check_new_name(input: &str, taken: &[String]) -> Result<String, String> {
    let name = validate_server_name(input).map_err(|e| e.to_string())?;
    if taken.iter().any(|existing| *existing == name) {
        return Err(format!("Server '{name}' is already configured"));
    }
    Ok(name)
}

/// Positions of `defaults` within [`Target::ALL`].
pub(crate) fn default_indices(defaults: &[Target]) -> Vec<usize> {
    Target::ALL
        .iter()
        .enumerate()
        .filter(|(_, target)| defaults.contains(target))
        .map(|(index, _)| index)
        .collect()
}
