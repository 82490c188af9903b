//! Deferred, cancellable units of work.
//!
//! Work is queued with [`DeferredTasks::submit`] and only runs when the owner
//! calls [`DeferredTasks::run_pending`], i.e. after the current render pass.
//! Submitting again for the same key cancels the earlier handle, so stale
//! results are never applied.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cancellation handle for a submitted task.
#[derive(Debug, Clone, Default)]
pub struct TaskHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle {
    fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Results of a cancelled task are dropped.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn same_task(&self, other: &TaskHandle) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}

type Work<T> = Box<dyn FnOnce() -> T + Send>;

struct PendingTask<K, T> {
    key: K,
    handle: TaskHandle,
    work: Work<T>,
}

/// Queue of deferred work keyed by owner.
pub struct DeferredTasks<K, T> {
    queue: VecDeque<PendingTask<K, T>>,
    active: HashMap<K, TaskHandle>,
}

impl<K, T> std::fmt::Debug for DeferredTasks<K, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredTasks")
            .field("queued", &self.queue.len())
            .field("active", &self.active.len())
            .finish()
    }
}

impl<K, T> Default for DeferredTasks<K, T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            active: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash, T> DeferredTasks<K, T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `work` for `key`, cancelling any earlier task for the same key.
    pub fn submit<F>(&mut self, key: K, work: F) -> TaskHandle
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let handle = TaskHandle::new();
        if let Some(previous) = self.active.insert(key.clone(), handle.clone()) {
            previous.cancel();
        }
        self.queue.push_back(PendingTask {
            key,
            handle: handle.clone(),
            work: Box::new(work),
        });
        handle
    }

    /// Cancel the active task for `key`, if any.
    pub fn cancel(&mut self, key: &K) -> bool {
        match self.active.remove(key) {
            Some(handle) => {
                handle.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel active tasks whose key fails `keep`.
    pub fn cancel_unless<P>(&mut self, mut keep: P) -> usize
    where
        P: FnMut(&K) -> bool,
    {
        let mut cancelled = 0;
        self.active.retain(|key, handle| {
            if keep(key) {
                true
            } else {
                handle.cancel();
                cancelled += 1;
                false
            }
        });
        cancelled
    }

    /// Whether `key` has a task that has not completed yet.
    pub fn is_pending(&self, key: &K) -> bool {
        self.active.contains_key(key)
    }

    /// Number of queued tasks not yet cancelled.
    pub fn pending_count(&self) -> usize {
        self.queue
            .iter()
            .filter(|task| !task.handle.is_cancelled())
            .count()
    }

    /// Run every queued task and return results of those still current.
    ///
    /// Each task runs independently: a cancelled task is skipped without
    /// affecting the others. The cancel flag is checked again after the work
    /// finishes, before the result is handed out.
    pub fn run_pending(&mut self) -> Vec<(K, T)> {
        let mut results = Vec::new();

        while let Some(task) = self.queue.pop_front() {
            if task.handle.is_cancelled() {
                continue;
            }

            let output = (task.work)();

            if task.handle.is_cancelled() {
                continue;
            }
            if self
                .active
                .get(&task.key)
                .is_some_and(|h| h.same_task(&task.handle))
            {
                self.active.remove(&task.key);
            }
            results.push((task.key, output));
        }

        results
    }
}
