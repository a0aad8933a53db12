//! In-memory document snapshot backed by RwLock.
//!
//! The single source of truth for every view. The snapshot is only ever
//! replaced whole by a successful refresh — never merged, never partially
//! deleted — so concurrent refreshes degrade to last-response-wins, which
//! is stale data at worst, not corruption.

use std::sync::RwLock;

use crate::client::DocumentApi;
use crate::error::ClientError;
use crate::models::Document;

pub struct DocumentStore {
    documents: RwLock<Vec<Document>>,
}

impl DocumentStore {
    /// Empty store; populated by the first successful [`refresh`](Self::refresh).
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(Vec::new()),
        }
    }

    /// Replace the whole snapshot with the server's current collection.
    ///
    /// On failure the previous snapshot is retained unchanged — stale but
    /// valid data beats an empty list.
    pub async fn refresh<A: DocumentApi>(&self, api: &A) -> Result<(), ClientError> {
        let documents = match api.list().await {
            Ok(documents) => documents,
            Err(err) => {
                tracing::warn!(error = %err, "refresh failed, keeping previous snapshot");
                return Err(err);
            }
        };

        let mut current = self
            .documents
            .write()
            .map_err(|_| ClientError::LockPoisoned)?;
        tracing::debug!(
            previous = current.len(),
            next = documents.len(),
            "snapshot replaced"
        );
        *current = documents;
        Ok(())
    }

    /// Latest snapshot, in server response order.
    pub fn current(&self) -> Result<Vec<Document>, ClientError> {
        Ok(self
            .documents
            .read()
            .map_err(|_| ClientError::LockPoisoned)?
            .clone())
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockDocumentApi;

    #[test]
    fn starts_empty() {
        let store = DocumentStore::new();
        assert!(store.current().unwrap().is_empty());
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot_wholesale() {
        let store = DocumentStore::new();
        let api = MockDocumentApi::new()
            .with_documents(vec![Document::stub("a"), Document::stub("b")]);

        store.refresh(&api).await.unwrap();
        let snapshot = store.current().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id, "a");
        assert_eq!(snapshot[1].id, "b");
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let store = DocumentStore::new();
        let api = MockDocumentApi::new().with_documents(vec![Document::stub("a")]);
        store.refresh(&api).await.unwrap();

        api.set_fail_list(true);
        let result = store.refresh(&api).await;
        assert!(matches!(result, Err(ClientError::Network(_))));

        let snapshot = store.current().unwrap();
        assert_eq!(snapshot.len(), 1, "snapshot must not be cleared");
        assert_eq!(snapshot[0].id, "a");
    }

    #[tokio::test]
    async fn refresh_preserves_server_order() {
        let store = DocumentStore::new();
        let api = MockDocumentApi::new().with_documents(vec![
            Document::stub("z"),
            Document::stub("a"),
            Document::stub("m"),
        ]);

        store.refresh(&api).await.unwrap();
        let ids: Vec<String> = store
            .current()
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }
}
