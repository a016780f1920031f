use chrono::Local;
use dialoguer::{theme::ColorfulTheme, Confirm};
use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    controller::Controller,
    errors::TrackerError,
    view::TerminalView,
};

use super::{
    commands,
    core::{CliError, CliMode, CommandError, LoopControl},
    output::{self, OutputPreferences},
    registry::CommandRegistry,
};

const SUGGESTION_DISTANCE: usize = 3;

/// Everything a command handler can reach: the controller, config, and registry.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub controller: Controller<TerminalView>,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_config_manager(mode, config_manager)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let view = TerminalView::new(config.number_format(), config.plain_mode);
        let mut context = Self {
            mode,
            registry,
            controller: Controller::new(view),
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            running: true,
        };
        context.apply_config();
        context.controller.init(Local::now().date_naive());
        Ok(context)
    }

    /// Pushes the current config into the view and output helpers.
    pub(crate) fn apply_config(&mut self) {
        output::set_preferences(OutputPreferences {
            plain_mode: self.config.plain_mode,
        });
        let view = self.controller.view_mut();
        view.set_format(self.config.number_format());
        view.set_plain(self.config.plain_mode);
    }

    pub(crate) fn update_config(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        let mut updated = self.config.clone();
        updated.set(key, value)?;
        self.config_manager.save(&updated)?;
        self.config = updated;
        self.apply_config();
        Ok(())
    }

    pub fn prompt(&self) -> String {
        self.controller.view().prompt()
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        match handler(self, args) {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let needle = input.to_ascii_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                output::info(format!("Suggestion: `{name}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt("Exit shell?")
            .default(true)
            .interact()
            .map_err(|err| CliError::Command(err.to_string()))
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                tracing::debug!(error = %other, "command failed");
                output::error(other);
                Ok(())
            }
        }
    }
}
