use std::path::PathBuf;

use crate::error::CredentialStoreError;

pub const CREDENTIAL_DIR: &str = ".tempshell";
pub const CREDENTIAL_FILE: &str = "credentials.json";

/// Returns `~/.tempshell/credentials.json` for the current user.
pub fn default_credential_path() -> Result<PathBuf, CredentialStoreError> {
    let home = home_dir().ok_or(CredentialStoreError::NoHomeDirectory)?;
    Ok(home.join(CREDENTIAL_DIR).join(CREDENTIAL_FILE))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
