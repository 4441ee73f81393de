//! Mirror worker - best-effort remote writes
//!
//! Every local mutation in formal mode enqueues the current
//! accounts/transactions payload here. A single consumer task pushes
//! each job to the remote store and logs failures; callers never wait
//! on the queue. Local storage stays authoritative, the remote store is
//! a mirror.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::ports::{DocumentStore, UserDocument};

/// A queued remote write: the full payload for one user document.
#[derive(Debug, Clone)]
pub struct MirrorJob {
    pub user_id: String,
    pub document: UserDocument,
}

/// Sending side of the mirror queue.
#[derive(Clone)]
pub struct MirrorHandle {
    jobs: UnboundedSender<MirrorJob>,
}

impl MirrorHandle {
    /// Queue a job without waiting for it to run.
    pub fn enqueue(&self, job: MirrorJob) {
        if self.jobs.send(job).is_err() {
            debug!("mirror worker is gone; dropping remote write");
        }
    }
}

/// Spawn the mirror consumer task.
///
/// The task runs until every handle is dropped, drains what is left in
/// the queue, then exits. Must be called within a Tokio runtime.
pub fn spawn(remote: Arc<dyn DocumentStore>) -> (MirrorHandle, JoinHandle<()>) {
    let (jobs, mut queue) = mpsc::unbounded_channel::<MirrorJob>();

    let task = tokio::spawn(async move {
        while let Some(job) = queue.recv().await {
            if let Err(e) = remote.upsert(&job.user_id, &job.document).await {
                warn!(user_id = %job.user_id, "remote mirror write failed: {e}");
            }
        }
    });

    (MirrorHandle { jobs }, task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryDocumentStore;
    use crate::seed;
    use chrono::Utc;

    fn job(user_id: &str) -> MirrorJob {
        MirrorJob {
            user_id: user_id.to_string(),
            document: UserDocument {
                accounts: seed::demo_accounts(),
                transactions: seed::demo_transactions(),
                updated_at: Utc::now(),
            },
        }
    }

    #[tokio::test]
    async fn test_jobs_reach_the_remote_store() {
        let remote = Arc::new(MemoryDocumentStore::new());
        let (handle, task) = spawn(remote.clone());

        handle.enqueue(job("u1"));
        handle.enqueue(job("u1"));
        drop(handle);
        task.await.unwrap();

        assert_eq!(remote.write_count(), 2);
        assert_eq!(remote.document("u1").unwrap().accounts.len(), 3);
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let remote = Arc::new(MemoryDocumentStore::new());
        remote.set_fail_writes(true);
        let (handle, task) = spawn(remote.clone());

        handle.enqueue(job("u1"));
        drop(handle);
        task.await.unwrap();

        assert_eq!(remote.write_count(), 0);
        assert!(remote.document("u1").is_none());
    }

    #[test]
    fn test_enqueue_after_worker_exit_is_a_noop() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let remote = Arc::new(MemoryDocumentStore::new());
        let (handle, task) = runtime.block_on(async { spawn(remote) });
        task.abort();
        runtime.block_on(async {
            let _ = task.await;
        });
        // The send side must not panic once the consumer is gone.
        handle.enqueue(job("u1"));
    }
}
