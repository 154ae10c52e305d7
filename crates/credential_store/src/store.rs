use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde_json::Value;

use crate::error::CredentialStoreError;
use crate::paths::default_credential_path;

/// Keyed durable storage for credential entries.
///
/// Each key is read, written, and removed independently; implementations must
/// make a removed or never-written key indistinguishable from one another.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialStoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CredentialStoreError>;
    fn remove(&self, key: &str) -> Result<(), CredentialStoreError>;
}

/// File-backed store persisting entries as one JSON object map.
///
/// The file is rewritten whole on every mutation via a temp-file rename, and
/// is kept owner-readable only on Unix.
pub struct FileCredentialStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileCredentialStore {
    /// Opens the store at `path`, loading existing entries.
    ///
    /// A missing file is an empty store; a present but unreadable or
    /// malformed file is an error so that stale credentials are never
    /// silently discarded.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CredentialStoreError> {
        let path = path.into();
        let entries = load_entries(&path)?;
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Opens the store at the per-user default location.
    pub fn open_default() -> Result<Self, CredentialStoreError> {
        Self::open(default_credential_path()?)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), CredentialStoreError> {
        let serialized = serde_json::to_string_pretty(entries)
            .map_err(|source| CredentialStoreError::serialize(&self.path, source))?;
        write_file_atomic(&self.path, &serialized)
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialStoreError> {
        Ok(lock_unpoisoned(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialStoreError> {
        let mut entries = lock_unpoisoned(&self.entries);
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), CredentialStoreError> {
        let mut entries = lock_unpoisoned(&self.entries);
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries)
    }
}

/// Ephemeral in-process store. Nothing survives the process; primarily
/// useful as a test double behind the [`CredentialStore`] port.
#[derive(Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, CredentialStoreError> {
        Ok(lock_unpoisoned(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CredentialStoreError> {
        lock_unpoisoned(&self.entries).insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CredentialStoreError> {
        lock_unpoisoned(&self.entries).remove(key);
        Ok(())
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, CredentialStoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            return Ok(BTreeMap::new());
        }
        Err(source) => {
            return Err(CredentialStoreError::io(
                "reading credential file",
                path,
                source,
            ));
        }
    };

    let parsed = serde_json::from_str::<Value>(&raw)
        .map_err(|source| CredentialStoreError::parse(path, source))?;

    let Value::Object(object) = parsed else {
        return Err(CredentialStoreError::InvalidShape {
            path: path.to_path_buf(),
        });
    };

    let mut entries = BTreeMap::new();
    for (key, value) in object {
        let Value::String(value) = value else {
            return Err(CredentialStoreError::InvalidShape {
                path: path.to_path_buf(),
            });
        };
        entries.insert(key, value);
    }

    Ok(entries)
}

fn write_file_atomic(path: &Path, contents: &str) -> Result<(), CredentialStoreError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .map_err(|source| CredentialStoreError::io("creating credential directory", path, source))?;

    let tmp = parent.join(format!(
        ".{}.tmp-{}",
        path.file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("credentials.json"),
        std::process::id()
    ));

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&tmp)
        .map_err(|source| CredentialStoreError::io("creating credential temp file", &tmp, source))?;
    restrict_permissions(&tmp)
        .map_err(|source| CredentialStoreError::io("restricting credential file mode", &tmp, source))?;
    file.write_all(contents.as_bytes())
        .map_err(|source| CredentialStoreError::io("writing credential temp file", &tmp, source))?;
    file.sync_all()
        .map_err(|source| CredentialStoreError::io("syncing credential temp file", &tmp, source))?;
    drop(file);

    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(CredentialStoreError::io(
            "replacing credential file",
            path,
            source,
        ));
    }

    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
