use crate::commands::Command;
use async_trait::async_trait;
use clap::{ArgMatches, Command as ClapCommand};
use toml::Value;
use unlim_lib::config::Config;

pub struct ConfigCommand;

#[async_trait]
impl Command for ConfigCommand {
    fn name(&self) -> &'static str {
        "config"
    }

    async fn execute(&self, matches: &ArgMatches) {
        match matches.subcommand() {
            Some(("list", sub_matches)) => ConfigListCommand.execute(sub_matches).await,
            _ => eprintln!("Invalid subcommand for config"),
        }
    }

    fn clap_command(&self) -> ClapCommand {
        ClapCommand::new(self.name())
            .about("Manage configuration")
            .subcommand(ConfigListCommand.clap_command())
    }
}

pub struct ConfigListCommand;

#[async_trait]
impl Command for ConfigListCommand {
    fn name(&self) -> &'static str {
        "list"
    }

    async fn execute(&self, _matches: &ArgMatches) {
        let config = match Config::load() {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
        };
        match config_lines(&config) {
            Ok(lines) => lines.iter().for_each(|line| println!("{}", line)),
            Err(err) => eprintln!("Error: {}", err),
        }
    }

    fn clap_command(&self) -> ClapCommand {
        ClapCommand::new(self.name()).about("List the effective configuration")
    }
}

fn config_lines(config: &Config) -> Result<Vec<String>, toml::ser::Error> {
    let value = Value::try_from(config)?;
    let mut lines = Vec::new();
    collect_nested("", &value, &mut lines);
    lines.push(format!(
        "config_file = {}",
        Config::config_file_path().display()
    ));
    lines.push(format!("storage = {}", config.storage_path().display()));
    Ok(lines)
}

fn collect_nested(prefix: &str, value: &Value, lines: &mut Vec<String>) {
    match value {
        Value::Table(map) => {
            for (key, val) in map {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                collect_nested(&new_prefix, val, lines);
            }
        }
        Value::String(s) => lines.push(format!("{} = {}", prefix, s)),
        _ => lines.push(format!("{} = {}", prefix, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_lines() {
        let lines = config_lines(&Config::default()).unwrap();
        assert!(lines.contains(&"current_version = 1.0.0".to_string()));
        assert!(lines.contains(&"snooze_duration_ms = 259200000".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("storage = ")));
    }

    #[test]
    fn test_nested_values_are_flattened() {
        let value: Value = toml::from_str("[a]\nb = 1\nc = \"x\"").unwrap();
        let mut lines = Vec::new();
        collect_nested("", &value, &mut lines);
        assert_eq!(lines, vec!["a.b = 1".to_string(), "a.c = x".to_string()]);
    }
}
