pub mod check;
pub mod config;
pub mod notes;
pub mod snooze;

use async_trait::async_trait;
use clap::{ArgMatches, Command as ClapCommand};
use std::collections::HashMap;

pub fn build_app(registry: &CommandRegistry) -> ClapCommand {
    let mut app = ClapCommand::new("unlim-update")
        .about("Check for new Unlim Cloud releases")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(clap::Arg::new("debug")
            .long("debug")
            .help("Enable debug logging")
            .action(clap::ArgAction::SetTrue)
            .global(true));

    for subcommand in registry.commands.values() {
        app = app.subcommand(subcommand.clap_command());
    }

    app
}

#[async_trait]
pub trait Command {
    fn name(&self) -> &'static str;
    async fn execute(&self, matches: &ArgMatches);
    fn clap_command(&self) -> ClapCommand;
}

pub struct CommandRegistry {
    pub commands: HashMap<&'static str, Box<dyn Command + Send + Sync>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register<C: Command + Send + Sync + 'static>(&mut self, command: C) {
        self.commands.insert(command.name(), Box::new(command));
    }

    pub async fn execute(&self, name: &str, matches: &ArgMatches) {
        if let Some(command) = self.commands.get(name) {
            command.execute(matches).await;
        } else {
            println!("{} not found", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::check::CheckCommand;
    use crate::commands::config::ConfigCommand;
    use crate::commands::notes::NotesCommand;
    use crate::commands::snooze::SnoozeCommand;

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(CheckCommand);
        registry.register(NotesCommand);
        registry.register(SnoozeCommand);
        registry.register(ConfigCommand);
        registry
    }

    #[test]
    fn test_cli_definition_is_valid() {
        build_app(&registry()).debug_assert();
    }

    #[test]
    fn test_check_flags() {
        let matches = build_app(&registry())
            .try_get_matches_from(["unlim-update", "--debug", "check", "--no-prompt", "--no-open"])
            .unwrap();
        assert!(matches.get_flag("debug"));
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "check");
        assert!(sub.get_flag("no-prompt"));
        assert!(sub.get_flag("no-open"));
    }

    #[test]
    fn test_notes_version_argument() {
        let matches = build_app(&registry())
            .try_get_matches_from(["unlim-update", "notes", "1.2.0"])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        assert_eq!(
            sub.get_one::<String>("version").map(String::as_str),
            Some("1.2.0")
        );
    }

    #[test]
    fn test_snooze_set_and_clear_conflict() {
        let result = build_app(&registry())
            .try_get_matches_from(["unlim-update", "snooze", "--set", "3d", "--clear"]);
        assert!(result.is_err());
    }
}
