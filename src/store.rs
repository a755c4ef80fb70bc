use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::models::organisation::Organisation;
use crate::models::session::Session;
use crate::models::user::{UserGroup, WhoAmI};

/// Key under which the session is persisted.
pub const SESSION_STORAGE_KEY: &str = "userData";

/// Where a serialised session lives between restarts.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> io::Result<Option<String>>;
    fn save(&self, contents: &str) -> io::Result<()>;
}

/// Process-local storage. Clones share the same slot, so a test can keep a
/// handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(contents.into()))),
        }
    }
}

fn poisoned<T>(_: T) -> io::Error {
    io::Error::other("session storage lock poisoned")
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.slot.lock().map_err(poisoned)?.clone())
    }

    fn save(&self, contents: &str) -> io::Result<()> {
        *self.slot.lock().map_err(poisoned)? = Some(contents.to_owned());
        Ok(())
    }
}

/// A JSON file on disk. A missing file is an empty session.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn save(&self, contents: &str) -> io::Result<()> {
        fs::write(&self.path, contents)
    }
}

/// The single source of truth for the current user.
///
/// Every mutation is written through to the backing storage so the session
/// survives a restart. Storage failures are logged, never raised: the
/// in-memory state stays authoritative.
pub struct SessionStore {
    state: Session,
    storage: Box<dyn SessionStorage>,
}

impl SessionStore {
    /// Opens the store, rehydrating whatever `storage` holds.
    ///
    /// Unreadable or malformed contents fall back to an empty session.
    pub fn open(storage: impl SessionStorage + 'static) -> Self {
        let state = match storage.load() {
            Ok(Some(contents)) => match sonic_rs::from_str::<Session>(&contents) {
                Ok(session) => {
                    tracing::debug!("✅ Session rehydrated from {}", SESSION_STORAGE_KEY);
                    session
                }
                Err(e) => {
                    tracing::warn!("❌ Discarding malformed session: {}", e);
                    Session::default()
                }
            },
            Ok(None) => Session::default(),
            Err(e) => {
                tracing::warn!("❌ Session storage unreadable: {}", e);
                Session::default()
            }
        };

        Self {
            state,
            storage: Box::new(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self::open(MemoryStorage::new())
    }

    pub fn session(&self) -> &Session {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.is_logged_in()
    }

    pub fn id_token(&self) -> Option<&str> {
        self.state.id_token.as_deref()
    }

    pub fn primary_group(&self) -> Option<UserGroup> {
        self.state.primary_group()
    }

    pub fn set_id_token(&mut self, token: impl Into<String>) {
        self.state.wipe_token();
        self.state.id_token = Some(token.into());
        self.persist();
    }

    /// Copies the identity fields. Organisation details and the token are
    /// left as they are.
    pub fn set_from_who_am_i(&mut self, who: &WhoAmI) {
        self.state.id = Some(who.id.clone());
        self.state.email = Some(who.email.clone());
        self.state.family_name = Some(who.family_name.clone());
        self.state.given_name = Some(who.given_name.clone());
        self.state.groups = Some(who.groups.clone());
        self.state.organisation_id = Some(who.organisation_id.clone());
        self.persist();
    }

    /// Copies the organisation's name, ABN and email. The organisation id
    /// stays the one reported by who-am-i.
    pub fn set_user_organisation_details(&mut self, organisation: &Organisation) {
        self.state.organisation_name = Some(organisation.name.clone());
        self.state.organisation_abn = Some(organisation.abn.clone());
        self.state.organisation_email = Some(organisation.email.clone());
        self.persist();
    }

    /// Resets every field to empty.
    pub fn clear(&mut self) {
        self.state.wipe_token();
        self.state = Session::default();
        self.persist();
        tracing::info!("🔒 Session cleared");
    }

    fn persist(&self) {
        let contents = match sonic_rs::to_string(&self.state) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("❌ Session could not be encoded: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.save(&contents) {
            tracing::warn!("❌ Session could not be persisted: {}", e);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
