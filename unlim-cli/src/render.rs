use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use unlim_lib::config::Config;
use unlim_lib::UpdateStatus;

pub const CHECKING_MESSAGE: &str = "Checking for updates...";

pub fn checking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(CHECKING_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub fn render(status: &UpdateStatus, config: &Config) -> String {
    match status {
        UpdateStatus::Checking => CHECKING_MESSAGE.dimmed().to_string(),
        UpdateStatus::Error => format!(
            "{}\n\n{}",
            "Error".red().bold(),
            "Could not check for updates. Please try again later."
        ),
        UpdateStatus::NoUpdate => format!(
            "{}\n\nVersion {} is the latest version.",
            "You're Up-to-Date!".bold(),
            config.current_version
        ),
        UpdateStatus::Snoozed => format!("Update reminder snoozed. Opening {}...", config.web_app_url)
            .dimmed()
            .to_string(),
        UpdateStatus::Available {
            new_version,
            release_notes,
        } => {
            let mut out = format!(
                "{}\n{}\n",
                "New Version Available!".bold(),
                format!("Version {}", new_version).blue().bold()
            );
            if !release_notes.is_empty() {
                out.push_str(&format!(
                    "\n{}\n{}\n",
                    "Release Notes".bold(),
                    release_notes
                ));
            }
            out.push_str(&format!(
                "\n{}\n  GitHub: {}\n  PayPal: {}",
                "Support the developer".bold(),
                config.sponsor_url.cyan(),
                config.paypal_url.cyan()
            ));
            out
        }
    }
}
