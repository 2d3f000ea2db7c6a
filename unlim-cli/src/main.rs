use crate::commands::check::CheckCommand;
use crate::commands::config::ConfigCommand;
use crate::commands::notes::NotesCommand;
use crate::commands::snooze::SnoozeCommand;
use crate::commands::CommandRegistry;

mod commands;
mod render;

#[tokio::main]
async fn main() {
    let mut registry = CommandRegistry::new();
    registry.register(CheckCommand);
    registry.register(NotesCommand);
    registry.register(SnoozeCommand);
    registry.register(ConfigCommand);

    let app = commands::build_app(&registry);
    let matches = app.get_matches();

    // Diagnostics stay hidden unless asked for with --debug or RUST_LOG.
    let default_filter = if matches.get_flag("debug") { "debug" } else { "off" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match matches.subcommand() {
        Some((name, sub_matches)) => registry.execute(name, sub_matches).await,
        None => registry.execute("check", &matches).await,
    }
}
