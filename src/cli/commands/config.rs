use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::config::Config;

const USAGE: &str = "config [show|set <key> <value>]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change display settings",
        USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show(context);
            Ok(())
        }
        ["set", key, value] => {
            context.update_config(key, value)?;
            output::success(format!("Set {key} = {value}."));
            Ok(())
        }
        _ => Err(CommandError::usage(USAGE)),
    }
}

fn show(context: &ShellContext) {
    output::section("Configuration");
    for key in Config::KEYS {
        if let Some(value) = context.config.get(key) {
            output::info(format!("  {key:<20} {value}"));
        }
    }
    output::info(format!(
        "  {:<20} {}",
        "file",
        context.config_manager.path().display()
    ));
}
