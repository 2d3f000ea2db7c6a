use crate::client::github_client::ContentSource;
use crate::config::Config;
use crate::models::release::{ReleaseManifest, UpdateError};
use crate::models::status::{CheckEvent, UpdateStatus, UserAction};
use crate::navigation::Navigator;
use crate::storage::database::KeyValueStore;
use crate::storage::snooze::{format_timestamp, SnoozeRecord};
use crate::utils::changelog::{parse_changelog, NOTES_UNAVAILABLE};
use crate::utils::encoding::decode_content;
use crate::utils::version::is_newer;
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

/// Drives one update check: snooze gate, manifest, changelog, then user actions.
pub struct UpdateChecker<C, S, N>
where
    S: KeyValueStore,
{
    config: Config,
    client: C,
    snooze: Option<SnoozeRecord<S>>,
    navigator: N,
    status: UpdateStatus,
}

impl<C, S, N> UpdateChecker<C, S, N>
where
    C: ContentSource,
    S: KeyValueStore,
    N: Navigator,
{
    /// `store` is `None` when local storage is not usable; snoozing is then disabled
    /// but the check itself still runs.
    pub fn new(config: Config, client: C, store: Option<S>, navigator: N) -> Self {
        let snooze = store.map(|store| SnoozeRecord::new(store, &config.snooze_key));
        Self {
            config,
            client,
            snooze,
            navigator,
            status: UpdateStatus::Checking,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn status(&self) -> &UpdateStatus {
        &self.status
    }

    pub fn storage_available(&self) -> bool {
        self.snooze.is_some()
    }

    pub fn snoozed_until(&self) -> Option<i64> {
        self.snooze.as_ref().and_then(|snooze| snooze.snoozed_until())
    }

    pub async fn start(&mut self) -> &UpdateStatus {
        self.start_at(Utc::now()).await
    }

    /// Enter `Snoozed` and redirect to the app if the snooze is still running,
    /// otherwise run the version check.
    pub async fn start_at(&mut self, now: DateTime<Utc>) -> &UpdateStatus {
        let snoozed_until = self
            .snooze
            .as_ref()
            .and_then(|snooze| snooze.snoozed_until())
            .filter(|until| *until > now.timestamp_millis());

        if let Some(until) = snoozed_until {
            info!("Update prompt snoozed until {}", format_timestamp(until));
            self.transition(CheckEvent::SnoozeActive);
            if let Err(e) = self.navigator.navigate(&self.config.web_app_url) {
                warn!("{}", e);
            }
            return &self.status;
        }

        self.check_version().await
    }

    /// Single attempt, no retry. The changelog is only fetched once a newer
    /// version is known, and its failure never demotes `Available`.
    pub async fn check_version(&mut self) -> &UpdateStatus {
        self.status = UpdateStatus::Checking;

        let latest_version = match self.fetch_manifest().await {
            Ok(manifest) => manifest.version,
            Err(e) => {
                error!("Version check failed: {}", e);
                self.transition(CheckEvent::ManifestFailed);
                return &self.status;
            }
        };

        if is_newer(&latest_version, &self.config.current_version) {
            info!(
                "Version {} available (current {})",
                latest_version, self.config.current_version
            );
            self.transition(CheckEvent::NewerVersionFound(latest_version.clone()));
            let notes = self.fetch_release_notes(&latest_version).await;
            self.transition(CheckEvent::NotesResolved(notes));
        } else {
            debug!(
                "Remote version {} is not newer than {}",
                latest_version, self.config.current_version
            );
            self.transition(CheckEvent::UpToDate);
        }

        &self.status
    }

    pub async fn fetch_manifest(&self) -> Result<ReleaseManifest, UpdateError> {
        let response = self.client.fetch_file(&self.config.manifest_path).await?;
        let content = response
            .content
            .ok_or_else(|| UpdateError::ManifestError("response has no content".to_string()))?;
        let manifest: ReleaseManifest = serde_json::from_str(&decode_content(&content)?)?;
        Ok(manifest)
    }

    /// Never fails: any problem becomes one of the fixed fallback messages.
    pub async fn fetch_release_notes(&self, version: &str) -> String {
        match self.client.fetch_file(&self.config.changelog_path).await {
            Ok(response) => parse_changelog(response.content.as_deref(), version),
            Err(e) => {
                warn!("Changelog fetch error: {}", e);
                NOTES_UNAVAILABLE.to_string()
            }
        }
    }

    pub fn available_actions(&self) -> Vec<UserAction> {
        self.status.available_actions(self.storage_available())
    }

    pub fn perform(&self, action: UserAction) -> Result<(), UpdateError> {
        match action {
            UserAction::Download => self.download(),
            UserAction::RemindLater => self.remind_later().map(|_| ()),
            UserAction::GoToApp => self.go_to_app(),
        }
    }

    pub fn download(&self) -> Result<(), UpdateError> {
        self.ensure_offered(UserAction::Download)?;
        self.navigator.navigate(&self.config.releases_url())
    }

    pub fn go_to_app(&self) -> Result<(), UpdateError> {
        self.ensure_offered(UserAction::GoToApp)?;
        self.navigator.navigate(&self.config.web_app_url)
    }

    pub fn remind_later(&self) -> Result<i64, UpdateError> {
        self.remind_later_at(Utc::now())
    }

    /// Persist `now + snooze duration` and redirect to the app. Returns the stored
    /// timestamp.
    pub fn remind_later_at(&self, now: DateTime<Utc>) -> Result<i64, UpdateError> {
        let snooze = self.snooze.as_ref().ok_or(UpdateError::StorageUnavailable)?;
        self.ensure_offered(UserAction::RemindLater)?;

        let until = now
            .timestamp_millis()
            .checked_add(self.config.snooze_duration_ms)
            .ok_or(UpdateError::SnoozeOutOfRange(self.config.snooze_duration_ms))?;
        snooze.snooze_until(until)?;
        info!("Snoozed update prompt until {}", format_timestamp(until));
        self.navigator.navigate(&self.config.web_app_url)?;
        Ok(until)
    }

    fn ensure_offered(&self, action: UserAction) -> Result<(), UpdateError> {
        if self.available_actions().contains(&action) {
            Ok(())
        } else {
            Err(UpdateError::NotOffered(action.to_string()))
        }
    }

    fn transition(&mut self, event: CheckEvent) {
        let previous = std::mem::replace(&mut self.status, UpdateStatus::Checking);
        self.status = previous.apply(event);
    }
}
