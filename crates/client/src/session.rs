//! Credential providers and token stores.
//!
//! The transport client never reaches for ambient storage: it is handed a
//! [`CredentialProvider`] at construction and asks it for the current token
//! on every request. The auth flow writes tokens through a [`TokenStore`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use relic_arcade_core::AccessToken;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when persisting a token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Reading or writing the token file failed.
    #[error("token store I/O error at {}: {source}", path.display())]
    Io {
        /// Path of the token file.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The token file could not be encoded.
    #[error("token store format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Source of the bearer token attached to outbound requests.
pub trait CredentialProvider: Send + Sync {
    /// The current token, or `None` for an anonymous session.
    fn access_token(&self) -> Option<AccessToken>;
}

/// A credential provider the auth flow can write to.
pub trait TokenStore: CredentialProvider {
    /// Persist a freshly issued token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if the token cannot be persisted.
    fn save(&self, token: &AccessToken) -> Result<(), TokenError>;

    /// Forget the current token.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if the persisted token cannot be removed.
    fn clear(&self) -> Result<(), TokenError>;
}

/// Provider for anonymous sessions. Never yields a token.
#[derive(Debug, Default, Clone, Copy)]
pub struct Anonymous;

impl CredentialProvider for Anonymous {
    fn access_token(&self) -> Option<AccessToken> {
        None
    }
}

/// Provider that always yields the same token.
#[derive(Debug, Clone)]
pub struct StaticToken(AccessToken);

impl StaticToken {
    #[must_use]
    pub const fn new(token: AccessToken) -> Self {
        Self(token)
    }
}

impl CredentialProvider for StaticToken {
    fn access_token(&self) -> Option<AccessToken> {
        Some(self.0.clone())
    }
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<AccessToken>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing token.
    #[must_use]
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl CredentialProvider for MemoryTokenStore {
    fn access_token(&self) -> Option<AccessToken> {
        self.token.read().clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &AccessToken) -> Result<(), TokenError> {
        *self.token.write() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenError> {
        *self.token.write() = None;
        Ok(())
    }
}

/// On-disk layout of the token file.
///
/// The token lives under the well-known `access_token` key.
#[derive(Serialize, Deserialize)]
struct StoredSession {
    access_token: String,
}

/// Token store persisted as a small JSON file.
///
/// The file is read once when the store is opened and rewritten on every
/// `save`. A missing or unreadable file means an anonymous session.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    token: RwLock<Option<AccessToken>>,
}

impl FileTokenStore {
    /// Open the store at `path`, loading any token already persisted there.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = load_token(&path);
        Self {
            path,
            token: RwLock::new(token),
        }
    }

    /// Location of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> TokenError {
        TokenError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialProvider for FileTokenStore {
    fn access_token(&self) -> Option<AccessToken> {
        self.token.read().clone()
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &AccessToken) -> Result<(), TokenError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let contents = serde_json::to_vec_pretty(&StoredSession {
            access_token: token.expose().to_string(),
        })?;
        write_private(&self.path, &contents).map_err(|e| self.io_error(e))?;

        *self.token.write() = Some(token.clone());
        debug!(path = %self.path.display(), "Access token persisted");
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(self.io_error(e)),
        }

        *self.token.write() = None;
        debug!(path = %self.path.display(), "Access token removed");
        Ok(())
    }
}

fn load_token(path: &Path) -> Option<AccessToken> {
    let contents = match fs::read(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read token file");
            return None;
        }
    };

    match serde_json::from_slice::<StoredSession>(&contents) {
        Ok(stored) if !stored.access_token.is_empty() => {
            Some(AccessToken::new(stored.access_token))
        }
        Ok(_) => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring malformed token file");
            None
        }
    }
}

/// Write `contents` to a file readable by the owner only.
///
/// A new file is created with mode `0600`; an existing file is narrowed to
/// `0600` before it is truncated.
#[cfg(unix)]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.set_len(0)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(not(unix))]
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    fs::write(path, contents)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_no_token() {
        assert!(Anonymous.access_token().is_none());
    }

    #[test]
    fn test_static_token() {
        let provider = StaticToken::new(AccessToken::new("abc"));
        assert_eq!(provider.access_token().unwrap().expose(), "abc");
    }

    #[test]
    fn test_memory_store_save_and_clear() {
        let store = MemoryTokenStore::new();
        assert!(store.access_token().is_none());

        store.save(&AccessToken::new("t1")).unwrap();
        assert_eq!(store.access_token().unwrap().expose(), "t1");

        store.clear().unwrap();
        assert!(store.access_token().is_none());
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileTokenStore::open(&path);
        assert!(store.access_token().is_none());
        store.save(&AccessToken::new("persisted-token")).unwrap();

        let reopened = FileTokenStore::open(&path);
        assert_eq!(reopened.access_token().unwrap().expose(), "persisted-token");

        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["access_token"], "persisted-token");
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileTokenStore::open(&path);
        store.save(&AccessToken::new("t")).unwrap();
        store.clear().unwrap();

        assert!(!path.exists());
        assert!(store.access_token().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, b"not json").unwrap();

        assert!(FileTokenStore::open(&path).access_token().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        FileTokenStore::open(&path)
            .save(&AccessToken::new("t"))
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_narrows_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, br#"{"access_token":"old-token-with-a-longer-body"}"#).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileTokenStore::open(&path);
        store.save(&AccessToken::new("new")).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        let reopened = FileTokenStore::open(&path);
        assert_eq!(reopened.access_token().unwrap().expose(), "new");
    }
}
