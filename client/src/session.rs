//! Session store with an explicit lifecycle: rehydrated from local
//! storage once at app init, read as immutable snapshots everywhere,
//! mutated only by the login and logout flows.

use seed::browser::web_storage::{LocalStorage, WebStorage};
use seed::error;

use shared::models::{AuthUser, Session};

const STORAGE_KEY: &str = "session";

pub struct SessionStore {
    session: Session,
}

impl SessionStore {
    /// Loads the persisted session, falling back to logged-out.
    pub fn rehydrate() -> Self {
        let session = LocalStorage::get(STORAGE_KEY).unwrap_or_default();
        SessionStore { session }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.session.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.user.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.session.access_token.clone()
    }

    pub fn login(&mut self, session: Session) {
        if let Err(storage_error) = LocalStorage::insert(STORAGE_KEY, &session) {
            error!("failed to persist session:", storage_error);
        }
        self.session = session;
    }

    pub fn logout(&mut self) {
        if let Err(storage_error) = LocalStorage::remove(STORAGE_KEY) {
            error!("failed to clear persisted session:", storage_error);
        }
        self.session = Session::default();
    }
}
