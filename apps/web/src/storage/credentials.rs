//! Credential table: `username,password` rows in `users.csv`.

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::{GuardedFile, StoreError};
use crate::models::credential::Credential;

pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin123";

/// Username/password table with a seeded default account.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    file: Arc<GuardedFile>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(GuardedFile::new(path)),
        }
    }

    /// Creates the table with its header and the default account if it is
    /// missing or empty. Safe to call repeatedly.
    pub fn initialize(&self) -> Result<(), StoreError> {
        let _held = self.file.exclusive()?;
        self.initialize_locked()
    }

    /// True when a row matches both fields exactly.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, StoreError> {
        let _held = self.file.exclusive()?;
        self.initialize_locked()?;

        let found = self
            .read_all_locked()?
            .iter()
            .any(|c| c.username == username && c.password == password);
        Ok(found)
    }

    /// Appends a new account. Returns false if the username is already taken
    /// (case-sensitive).
    pub fn register(&self, username: &str, password: &str) -> Result<bool, StoreError> {
        let _held = self.file.exclusive()?;
        self.initialize_locked()?;

        if self
            .read_all_locked()?
            .iter()
            .any(|c| c.username == username)
        {
            return Ok(false);
        }

        let file = OpenOptions::new().append(true).open(&self.file.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(Credential::new(username, password))?;
        writer.flush()?;

        info!("Registered user '{username}'");
        Ok(true)
    }

    fn initialize_locked(&self) -> Result<(), StoreError> {
        if self.file.has_content() {
            return Ok(());
        }

        let mut writer = csv::Writer::from_writer(File::create(&self.file.path)?);
        writer.serialize(Credential::new(DEFAULT_USERNAME, DEFAULT_PASSWORD))?;
        writer.flush()?;

        info!("Created credential table at {}", self.file.path.display());
        Ok(())
    }

    fn read_all_locked(&self) -> Result<Vec<Credential>, StoreError> {
        let mut reader = csv::Reader::from_path(&self.file.path)?;
        let rows = reader.deserialize().collect::<Result<Vec<Credential>, _>>()?;
        Ok(rows)
    }
}
