//! Concurrent composition of bulk block-list patches.
//!
//! The add list and the remove list are mapped into triples by two
//! independent tasks. Whichever finishes first, the merged document is
//! always every `add` triple followed by every `remove` triple, so the
//! result is identical to building the two lists sequentially.

use std::time::Duration;
use tokio::task::JoinHandle;

use crate::domain::patch::BLOCKS;
use crate::domain::{LayerError, PatchDocument, PatchOperationKind};

/// Builds the body of a bulk block/unblock PATCH.
#[derive(Debug, Clone, Copy)]
pub struct BulkComposer {
    wait: Duration,
}

impl BulkComposer {
    /// `wait` bounds how long `compose` waits for both units.
    pub fn new(wait: Duration) -> Self {
        Self { wait }
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Merged `blocks` document: adds for `block_ids`, then removes for
    /// `unblock_ids`.
    pub async fn compose(
        &self,
        block_ids: Vec<String>,
        unblock_ids: Vec<String>,
    ) -> Result<PatchDocument, LayerError> {
        let adds = tokio::spawn(async move {
            PatchDocument::each(PatchOperationKind::Add, BLOCKS, block_ids)
        });
        let removes = tokio::spawn(async move {
            PatchDocument::each(PatchOperationKind::Remove, BLOCKS, unblock_ids)
        });

        self.join_ordered(adds, removes).await
    }

    /// Awaits both units and concatenates `first` then `second`.
    ///
    /// Units still running when the wait elapses are aborted.
    async fn join_ordered(
        &self,
        first: JoinHandle<PatchDocument>,
        second: JoinHandle<PatchDocument>,
    ) -> Result<PatchDocument, LayerError> {
        let first_abort = first.abort_handle();
        let second_abort = second.abort_handle();

        match tokio::time::timeout(self.wait, async { tokio::try_join!(first, second) }).await {
            Ok(Ok((mut merged, tail))) => {
                merged.extend(tail);
                Ok(merged)
            }
            Ok(Err(join_error)) => {
                first_abort.abort();
                second_abort.abort();
                tracing::warn!(error = %join_error, "Bulk composition unit failed");
                Err(LayerError::Compose(join_error.to_string()))
            }
            Err(_) => {
                first_abort.abort();
                second_abort.abort();
                tracing::warn!(wait = ?self.wait, "Bulk composition timed out");
                Err(LayerError::Compose(format!(
                    "units did not finish within {}ms",
                    self.wait.as_millis()
                )))
            }
        }
    }
}
