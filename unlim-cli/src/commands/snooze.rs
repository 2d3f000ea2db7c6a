use crate::commands::Command;
use async_trait::async_trait;
use chrono::Utc;
use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use colored::Colorize;
use unlim_lib::config::Config;
use unlim_lib::duration::{deadline_after, parse_duration};
use unlim_lib::storage::database::SledStore;
use unlim_lib::storage::snooze::{format_timestamp, SnoozeRecord};

pub struct SnoozeCommand;

#[async_trait]
impl Command for SnoozeCommand {
    fn name(&self) -> &'static str {
        "snooze"
    }

    async fn execute(&self, matches: &ArgMatches) {
        if let Err(e) = run(matches) {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    fn clap_command(&self) -> ClapCommand {
        ClapCommand::new(self.name())
            .about("Show, set or clear the update reminder snooze")
            .arg(
                Arg::new("set")
                    .long("set")
                    .value_name("DURATION")
                    .help("Snooze for a duration such as 12h or 3d")
                    .conflicts_with("clear"),
            )
            .arg(
                Arg::new("clear")
                    .long("clear")
                    .help("Remove the snooze so the next check prompts again")
                    .action(ArgAction::SetTrue),
            )
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| anyhow::anyhow!("{}", e))?;
    let path = config.storage_path();
    let store = SledStore::detect(&path)
        .ok_or_else(|| anyhow::anyhow!("Local storage is not available at {}", path.display()))?;
    let record = SnoozeRecord::new(store, &config.snooze_key);

    if matches.get_flag("clear") {
        record.clear()?;
        println!("✓ Snooze cleared");
        return Ok(());
    }

    if let Some(duration) = matches.get_one::<String>("set") {
        let duration = parse_duration(duration)?;
        let until = deadline_after(Utc::now(), duration)?.timestamp_millis();
        record.snooze_until(until)?;
        println!("✓ Snoozed until {}", format_timestamp(until));
        return Ok(());
    }

    match record.snoozed_until() {
        Some(until) if record.is_active(Utc::now()) => {
            println!("Snoozed until {}", format_timestamp(until).green())
        }
        Some(until) => println!("Snooze expired at {}", format_timestamp(until).dimmed()),
        None => println!("Not snoozed"),
    }
    Ok(())
}
