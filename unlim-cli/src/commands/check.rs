use crate::commands::Command;
use crate::render;
use async_trait::async_trait;
use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use inquire::Select;
use log::debug;
use unlim_lib::client::github_client::GitHubContentsClient;
use unlim_lib::config::Config;
use unlim_lib::navigation::{BrowserNavigator, Navigator, PrintNavigator};
use unlim_lib::services::UpdateChecker;
use unlim_lib::storage::database::SledStore;

pub struct CheckCommand;

#[async_trait]
impl Command for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    async fn execute(&self, matches: &ArgMatches) {
        let no_prompt = flag(matches, "no-prompt");
        let no_open = flag(matches, "no-open");

        let config = match Config::load() {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
        };
        let client = match GitHubContentsClient::new(&config) {
            Ok(client) => client,
            Err(err) => {
                eprintln!("Error: {}", err);
                std::process::exit(1);
            }
        };
        let store = SledStore::detect(&config.storage_path());
        debug!("local storage available: {}", store.is_some());
        let navigator: Box<dyn Navigator + Send + Sync> = if no_open {
            Box::new(PrintNavigator)
        } else {
            Box::new(BrowserNavigator)
        };

        let mut checker = UpdateChecker::new(config, client, store, navigator);

        let spinner = render::checking_spinner();
        let status = checker.start().await.clone();
        spinner.finish_and_clear();

        println!("{}", render::render(&status, checker.config()));

        let actions = checker.available_actions();
        if no_prompt || actions.is_empty() {
            return;
        }

        println!();
        match Select::new("What would you like to do?", actions).prompt() {
            Ok(action) => {
                if let Err(e) = checker.perform(action) {
                    eprintln!("❌ {}", e);
                }
            }
            Err(_) => println!("Skipped"),
        }
    }

    fn clap_command(&self) -> ClapCommand {
        ClapCommand::new(self.name())
            .about("Check for a new release (default)")
            .arg(
                Arg::new("no-prompt")
                    .long("no-prompt")
                    .help("Only print the result, do not ask what to do next")
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("no-open")
                    .long("no-open")
                    .help("Print URLs instead of opening them in the browser")
                    .action(ArgAction::SetTrue),
            )
    }
}

/// `check` also runs when no subcommand is given, in which case its flags are absent.
fn flag(matches: &ArgMatches, id: &str) -> bool {
    matches.try_contains_id(id).unwrap_or(false) && matches.get_flag(id)
}
