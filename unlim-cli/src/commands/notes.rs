use crate::commands::Command;
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command as ClapCommand};
use colored::Colorize;
use unlim_lib::client::github_client::GitHubContentsClient;
use unlim_lib::config::Config;
use unlim_lib::navigation::PrintNavigator;
use unlim_lib::services::UpdateChecker;
use unlim_lib::storage::database::SledStore;

pub struct NotesCommand;

#[async_trait]
impl Command for NotesCommand {
    fn name(&self) -> &'static str {
        "notes"
    }

    async fn execute(&self, matches: &ArgMatches) {
        if let Err(e) = print_notes(matches.get_one::<String>("version").cloned()).await {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    fn clap_command(&self) -> ClapCommand {
        ClapCommand::new(self.name())
            .about("Show the release notes for a version")
            .arg(
                Arg::new("version")
                    .help("Version to look up, defaults to the latest release")
                    .required(false),
            )
    }
}

async fn print_notes(version: Option<String>) -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| anyhow::anyhow!("{}", e))?;
    let client = GitHubContentsClient::new(&config)?;
    // Notes never touch the snooze record, so storage stays closed.
    let checker = UpdateChecker::new(config, client, None::<SledStore>, PrintNavigator);

    let version = match version {
        Some(version) => version,
        None => checker.fetch_manifest().await?.version,
    };
    let notes = checker.fetch_release_notes(&version).await;

    println!("{}", format!("Release Notes for {}", version).bold());
    println!("{}", notes);
    Ok(())
}
