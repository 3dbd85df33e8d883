use std::sync::Arc;

use tokio::sync::Mutex;

use super::store::JsonStore;
use super::RepositoryError;
use crate::models::feedback::FeedbackEntry;

/// Append-only feedback log, independent from the account store.
#[derive(Clone)]
pub struct FeedbackRepository {
    entries: Arc<Mutex<Vec<FeedbackEntry>>>,
    store: JsonStore,
}

impl FeedbackRepository {
    pub async fn open(store: JsonStore) -> Result<Self, RepositoryError> {
        let entries = store.load().await?;

        Ok(FeedbackRepository {
            entries: Arc::new(Mutex::new(entries)),
            store,
        })
    }

    pub async fn append(&self, entry: FeedbackEntry) -> Result<(), RepositoryError> {
        let mut entries = self.entries.lock().await;
        entries.push(entry);
        self.store.flush(&*entries).await
    }

    pub async fn list(&self) -> Vec<FeedbackEntry> {
        self.entries.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> JsonStore {
        let path =
            std::env::temp_dir().join(format!("screenpay-feedback-{}.json", uuid::Uuid::new_v4()));
        JsonStore::open(path)
    }

    #[tokio::test]
    async fn test_entries_keep_insertion_order() {
        let repo = FeedbackRepository::open(temp_store()).await.unwrap();

        repo.append(FeedbackEntry::new(
            "alice".to_string(),
            "a@x.com".to_string(),
            "first".to_string(),
        ))
        .await
        .unwrap();
        repo.append(FeedbackEntry::new(
            "bob".to_string(),
            "b@x.com".to_string(),
            "second".to_string(),
        ))
        .await
        .unwrap();

        let entries = repo.list().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].message, "second");
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let store = temp_store();
        let repo = FeedbackRepository::open(store.clone()).await.unwrap();
        repo.append(FeedbackEntry::new(
            "alice".to_string(),
            "a@x.com".to_string(),
            "keep me".to_string(),
        ))
        .await
        .unwrap();
        drop(repo);

        let reopened = FeedbackRepository::open(store).await.unwrap();
        let entries = reopened.list().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "alice");
    }
}
