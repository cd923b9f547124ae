use std::sync::Arc;
use tracing::{info, warn};

use crate::{
    storage::{KeyValueStore, TOKEN_KEY, USER_ID_KEY, USER_KEY},
    user::UserInfo,
    Result,
};

/// Boundary to the authentication provider. The UI reads the session and
/// only ever ends it through [`AuthProvider::logout`].
pub trait AuthProvider: Send + Sync {
    fn token(&self) -> Option<String>;
    fn user(&self) -> Option<UserInfo>;
    fn user_id(&self) -> Option<String>;
    fn logout(&self) -> Result<()>;

    fn is_signed_in(&self) -> bool {
        self.user().is_some()
    }
}

/// Session kept in local storage under `token`, `user` and `userId`.
pub struct StoredSession {
    store: Arc<dyn KeyValueStore>,
}
impl StoredSession {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value.filter(|it| !it.is_empty()),
            Err(err) => {
                warn!(?err, key, "failed to read session");
                None
            }
        }
    }
}

impl AuthProvider for StoredSession {
    fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    fn user(&self) -> Option<UserInfo> {
        let raw = self.read(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(?err, "stored user is not valid JSON");
                None
            }
        }
    }

    fn user_id(&self) -> Option<String> {
        self.read(USER_ID_KEY)
    }

    fn logout(&self) -> Result<()> {
        for key in [TOKEN_KEY, USER_KEY, USER_ID_KEY] {
            self.store.remove(key)?;
        }
        info!("session cleared");
        Ok(())
    }
}
