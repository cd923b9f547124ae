use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{KeyValueStore, REMINDERS_KEY, REMINDER_KEY};

/// Id given to the reminder read from the legacy singular key.
const LEGACY_REMINDER_ID: i64 = 1;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Reminder {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub description: String,
}

/// Reads the reminders surfaced in the notification panel: the `reminders`
/// collection followed by the legacy `reminder` entry, if any. Unreadable
/// entries are logged and skipped.
pub fn load_reminders(store: &dyn KeyValueStore) -> Vec<Reminder> {
    let mut reminders = match store.get_json::<Option<Vec<Reminder>>>(REMINDERS_KEY) {
        Ok(reminders) => reminders.flatten().unwrap_or_default(),
        Err(err) => {
            warn!(?err, "failed to read stored reminders");
            Vec::new()
        }
    };
    match store.get(REMINDER_KEY) {
        Ok(Some(description)) if !description.is_empty() => reminders.push(Reminder {
            id: LEGACY_REMINDER_ID,
            description,
        }),
        Ok(_) => {}
        Err(err) => warn!(?err, "failed to read legacy reminder"),
    }
    reminders
}
