use std::{
    fs::{self, File},
    io::{BufReader, ErrorKind},
    path::PathBuf,
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Snapshot of the authentication state, read by the router and the header.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    #[serde(default)]
    token: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|token| !token.is_empty()),
        }
    }
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// JSON file holding the token between runs.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<Session> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Session::default()),
            Err(e) => return Err(e.into()),
        };
        debug!("Loading session {:?}", &self.path);
        let session: Session = serde_json::from_reader(BufReader::new(file))?;
        Ok(Session::new(session.token))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        debug!("Saving session {:?}", &self.path);
        fs::write(&self.path, serde_json::to_vec(session)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Owns the current session. Passed explicitly to whatever needs to read or
/// change it; `login` and `logout` are the only transitions.
#[derive(Debug, Clone)]
pub struct AuthContext {
    session: Session,
    store: SessionStore,
}

impl AuthContext {
    /// Restore the saved session. A token given on the command line wins
    /// over the saved one but is not written back.
    pub fn restore(store: SessionStore, token_override: Option<String>) -> Result<Self> {
        let session = match Session::new(token_override) {
            session if session.is_authenticated() => session,
            _ => store.load()?,
        };
        Ok(Self { session, store })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn login(&mut self, token: String) -> Result<()> {
        let session = Session::new(Some(token));
        self.store.save(&session)?;
        self.session = session;
        info!("Logged in");
        Ok(())
    }

    /// Safe to call when already logged out.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear()?;
        if self.session.is_authenticated() {
            info!("Logged out");
        }
        self.session = Session::default();
        Ok(())
    }
}
