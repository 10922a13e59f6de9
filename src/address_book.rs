use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::domain::{IdentityHash, SubscriberEmail};

#[derive(thiserror::Error, Debug)]
pub enum AddressBookError {
    #[error("Failed to access the address book store")]
    Io(#[from] std::io::Error),
    #[error("The address book store could not be decoded")]
    Encoding(#[from] serde_json::Error),
}

/// The durable subscriber registry: a map from unsubscribe token to email
/// address, mirrored to a single store file.
///
/// The book is the sole writer of its store. Mutations take the lock for
/// the whole load-mutate-persist cycle, rewrite the full set to a
/// temporary file and rename it over the store before reporting success,
/// so a crash mid-write leaves the previously committed entries intact.
#[derive(Debug)]
pub struct AddressBook {
    store_path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl AddressBook {
    /// Opens the store, starting from an empty book when the file does not
    /// exist yet.
    pub async fn load(store_path: impl Into<PathBuf>) -> Result<Self, AddressBookError> {
        let store_path = store_path.into();
        let entries = match tokio::fs::read(&store_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            store_path,
            entries: Mutex::new(entries),
        })
    }

    /// Registers an address. Returns `false` when it is already on the
    /// list; repeat subscriptions are a no-op, not an error.
    pub async fn add(&self, email: &SubscriberEmail) -> Result<bool, AddressBookError> {
        let token = IdentityHash::derive(email);
        let mut entries = self.entries.lock().await;
        if entries.contains_key(token.as_ref()) {
            return Ok(false);
        }
        entries.insert(token.as_ref().to_string(), email.as_ref().to_string());
        self.persist(&entries).await?;
        Ok(true)
    }

    /// Removes the subscriber behind a token, reporting the email that was
    /// taken off the list. Unknown tokens report `None`; unsubscribe links
    /// stay safe to replay.
    pub async fn remove(
        &self,
        token: &IdentityHash,
    ) -> Result<Option<String>, AddressBookError> {
        let mut entries = self.entries.lock().await;
        let removed = entries.remove(token.as_ref());
        if removed.is_some() {
            self.persist(&entries).await?;
        }
        Ok(removed)
    }

    /// A point-in-time copy of all `(token, email)` pairs. The order
    /// carries no meaning; mutations after the call do not show up in the
    /// returned snapshot.
    pub async fn snapshot(&self) -> Vec<(String, String)> {
        self.entries
            .lock()
            .await
            .iter()
            .map(|(token, email)| (token.clone(), email.clone()))
            .collect()
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), AddressBookError> {
        let encoded = serde_json::to_vec_pretty(entries)?;
        let tmp_path = self.store_path.with_extension("tmp");
        tokio::fs::write(&tmp_path, &encoded).await?;
        tokio::fs::rename(&tmp_path, &self.store_path).await?;
        Ok(())
    }
}
