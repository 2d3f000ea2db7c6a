use std::fmt;

/// Where the update check currently stands. Exactly one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    Checking,
    Available {
        new_version: String,
        release_notes: String,
    },
    NoUpdate,
    Snoozed,
    Error,
}

/// Something that happened during the check sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckEvent {
    SnoozeActive,
    ManifestFailed,
    NewerVersionFound(String),
    UpToDate,
    NotesResolved(String),
}

/// What the user can do once the check has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Download,
    RemindLater,
    GoToApp,
}

impl fmt::Display for UserAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserAction::Download => write!(f, "Download Now"),
            UserAction::RemindLater => write!(f, "Remind Me Later"),
            UserAction::GoToApp => write!(f, "Go to App"),
        }
    }
}

impl UpdateStatus {
    /// Transitions only leave `Checking`, except for release notes filling in an
    /// `Available` state. Any other event is ignored.
    pub fn apply(self, event: CheckEvent) -> UpdateStatus {
        match (self, event) {
            (UpdateStatus::Checking, CheckEvent::SnoozeActive) => UpdateStatus::Snoozed,
            (UpdateStatus::Checking, CheckEvent::ManifestFailed) => UpdateStatus::Error,
            (UpdateStatus::Checking, CheckEvent::UpToDate) => UpdateStatus::NoUpdate,
            (UpdateStatus::Checking, CheckEvent::NewerVersionFound(new_version)) => {
                UpdateStatus::Available {
                    new_version,
                    release_notes: String::new(),
                }
            }
            (UpdateStatus::Available { new_version, .. }, CheckEvent::NotesResolved(notes)) => {
                UpdateStatus::Available {
                    new_version,
                    release_notes: notes,
                }
            }
            (state, _) => state,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UpdateStatus::Checking => "checking",
            UpdateStatus::Available { .. } => "available",
            UpdateStatus::NoUpdate => "no-update",
            UpdateStatus::Snoozed => "snoozed",
            UpdateStatus::Error => "error",
        }
    }

    pub fn new_version(&self) -> Option<&str> {
        match self {
            UpdateStatus::Available { new_version, .. } => Some(new_version),
            _ => None,
        }
    }

    pub fn release_notes(&self) -> Option<&str> {
        match self {
            UpdateStatus::Available { release_notes, .. } => Some(release_notes),
            _ => None,
        }
    }

    /// Remind-later needs somewhere to persist the snooze, so it is only listed
    /// when storage is available.
    pub fn available_actions(&self, storage_available: bool) -> Vec<UserAction> {
        match self {
            UpdateStatus::Available { .. } => {
                let mut actions = vec![UserAction::Download];
                if storage_available {
                    actions.push(UserAction::RemindLater);
                }
                actions
            }
            UpdateStatus::NoUpdate | UpdateStatus::Error => vec![UserAction::GoToApp],
            UpdateStatus::Checking | UpdateStatus::Snoozed => Vec::new(),
        }
    }
}

impl fmt::Display for UpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
