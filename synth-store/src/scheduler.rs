use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};
use tokio::time::sleep;

use crate::{ScheduledTask, Storage, StoreConfig, TaskAction, UpdatedSnippet};

/// Processes scheduled tasks once they come due.
///
/// Pending transitions are ordinary store records, so anything queued is
/// visible to reads and survives as long as the store does. A sweep picks
/// up every task that is due, applies its action, and marks it completed.
pub struct Scheduler<S> {
    store: Arc<S>,
    config: StoreConfig,
}

impl<S> Scheduler<S>
where
    S: Storage,
{
    pub fn new(store: &Arc<S>, config: StoreConfig) -> Self {
        Self {
            store: store.clone(),
            config,
        }
    }

    /// Processes every task due at `now`, returning the amount processed
    pub fn sweep(&self, now: DateTime<Utc>) -> usize {
        let due = self.store.due_tasks(now);
        let amount = due.len();

        for task in due {
            self.process(&task);
            self.store.complete_task(task.id, now);
        }

        if amount > 0 {
            info!("Processed {} scheduled task(s)", amount);
        }

        amount
    }

    fn process(&self, task: &ScheduledTask) {
        match task.action {
            TaskAction::MakeDownloadable { snippet_id } => {
                let updated = self.store.update_snippet(
                    snippet_id,
                    UpdatedSnippet {
                        downloadable: Some(true),
                        ..Default::default()
                    },
                );

                if updated.is_none() {
                    warn!(
                        "Task {} points at snippet {} which no longer exists",
                        task.id, snippet_id
                    );
                }
            }
        }
    }
}

impl<S> Scheduler<S>
where
    S: Storage + 'static,
{
    /// Runs the sweep in a background task until the handle is aborted
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                self.sweep(Utc::now());
                sleep(self.config.sweep_interval()).await;
            }
        })
    }
}

#[cfg(test)]
mod test {
    use chrono::{Duration, Utc};
    use std::sync::Arc;

    use super::Scheduler;
    use crate::{
        MemoryStore, NewScheduledTask, NewSnippet, NewUser, SnippetId, Storage, StoreConfig,
        TaskAction,
    };

    fn scheduler() -> (Arc<MemoryStore>, Scheduler<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let scheduler = Scheduler::new(&store, StoreConfig::default());

        (store, scheduler)
    }

    fn draft_snippet(store: &MemoryStore) -> SnippetId {
        let user = store.create_user(NewUser {
            username: "john".to_string(),
            password: "hunter2".to_string(),
            email: "john@example.com".to_string(),
            avatar: None,
            bio: None,
        });

        store
            .create_snippet(NewSnippet {
                title: "Quicksort".to_string(),
                description: None,
                code: "fn main() {}".to_string(),
                language: "rust".to_string(),
                price: None,
                user_id: user.id,
            })
            .id
    }

    #[test]
    fn sweep_ignores_tasks_that_are_not_due() {
        let (store, scheduler) = scheduler();
        let snippet_id = draft_snippet(&store);
        let now = Utc::now();

        store.schedule_task(NewScheduledTask {
            action: TaskAction::MakeDownloadable { snippet_id },
            due_at: now + Duration::days(3),
        });

        assert_eq!(scheduler.sweep(now), 0);
        assert!(!store.snippet_by_id(snippet_id).unwrap().snippet.downloadable);
    }

    #[test]
    fn sweep_flips_the_snippet_downloadable_once_due() {
        let (store, scheduler) = scheduler();
        let snippet_id = draft_snippet(&store);
        let now = Utc::now();

        store.schedule_task(NewScheduledTask {
            action: TaskAction::MakeDownloadable { snippet_id },
            due_at: now + Duration::days(3),
        });

        let later = now + Duration::days(3);
        assert_eq!(scheduler.sweep(later), 1);
        assert!(store.snippet_by_id(snippet_id).unwrap().snippet.downloadable);

        // Completed tasks are not picked up again
        assert_eq!(scheduler.sweep(later), 0);
    }

    #[test]
    fn sweep_completes_tasks_with_vanished_targets() {
        let (store, scheduler) = scheduler();
        let now = Utc::now();

        store.schedule_task(NewScheduledTask {
            action: TaskAction::MakeDownloadable {
                snippet_id: SnippetId::from_value(42),
            },
            due_at: now,
        });

        assert_eq!(scheduler.sweep(now), 1);
        assert!(store.due_tasks(now).is_empty());
    }
}
