//! Index rebuild protocol.
//!
//! Idle -> Deleting -> Deleted -> Configuring -> Configured -> Uploading -> Done
//!
//! An empty document list stops at `DoneEmpty` right after the delete,
//! leaving no index on the service. Each step awaits completion of the
//! previous one; a failure ends the run in the matching error state.

use std::time::Instant;

use crate::core::error::Result;
use crate::core::sync::backend::{SearchBackend, PRIMARY_KEY};
use crate::core::types::{Document, IndexSettings, SyncReport, SyncState};

/// Drives one full rebuild of a named index
pub struct IndexSynchronizer<B: SearchBackend> {
    backend: B,
    index_name: String,
}

impl<B: SearchBackend> IndexSynchronizer<B> {
    pub fn new(backend: B, index_name: impl Into<String>) -> Self {
        Self {
            backend,
            index_name: index_name.into(),
        }
    }

    /// Replace the remote index with exactly `documents`
    ///
    /// The previous index is always deleted first, even when there is
    /// nothing to upload.
    pub async fn synchronize(
        &self,
        documents: &[Document],
        settings: &IndexSettings,
    ) -> Result<SyncReport> {
        let start = Instant::now();
        let mut state = SyncState::Idle;
        let index = self.index_name.as_str();

        let result = self.run_protocol(documents, settings, &mut state).await;
        match result {
            Ok((previous_index_existed, documents_uploaded)) => {
                let duration_ms = start.elapsed().as_millis() as u64;
                tracing::info!(
                    "Synchronized {} documents to '{}' in {}ms",
                    documents_uploaded,
                    index,
                    duration_ms
                );
                Ok(SyncReport {
                    index_name: self.index_name.clone(),
                    previous_index_existed,
                    documents_uploaded,
                    state,
                    duration_ms,
                })
            }
            Err(e) => {
                let failed = state.failure().unwrap_or(state);
                tracing::error!("Synchronization of '{}' ended in {:?}: {}", index, failed, e);
                Err(e)
            }
        }
    }

    /// Walk the states, leaving `state` at the last one reached.
    /// Returns whether the index existed and how many documents went up.
    async fn run_protocol(
        &self,
        documents: &[Document],
        settings: &IndexSettings,
        state: &mut SyncState,
    ) -> Result<(bool, usize)> {
        let index = self.index_name.as_str();

        self.advance(state, SyncState::Deleting);
        let existed = self.backend.delete_index_if_exists(index).await?;
        self.advance(state, SyncState::Deleted);
        if existed {
            tracing::info!("Deleted existing index '{}'", index);
        } else {
            tracing::info!("Index '{}' did not exist", index);
        }

        if documents.is_empty() {
            tracing::warn!("No documents to upload; index '{}' left absent", index);
            self.advance(state, SyncState::DoneEmpty);
            return Ok((existed, 0));
        }

        self.advance(state, SyncState::Configuring);
        self.backend.get_or_create_index(index, PRIMARY_KEY).await?;
        self.backend.update_settings(index, settings).await?;
        self.advance(state, SyncState::Configured);

        self.advance(state, SyncState::Uploading);
        self.backend
            .add_documents(index, documents, PRIMARY_KEY)
            .await?;
        self.advance(state, SyncState::Done);

        Ok((existed, documents.len()))
    }

    fn advance(&self, state: &mut SyncState, to: SyncState) {
        tracing::debug!("Index '{}': {:?} -> {:?}", self.index_name, state, to);
        *state = to;
    }
}
