//! Guarded async tasks with explicit disposal handles.
//!
//! DESIGN
//! ======
//! Browser fetches cannot be aborted cheaply, so cancellation is cooperative:
//! the task receives a `Liveness` flag and must check it before publishing
//! results. The owner keeps the `TaskHandle`; dropping or disposing it kills
//! the flag and runs registered cleanups exactly once.

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::sync::atomic::{AtomicBool, Ordering};

type Cleanup = Box<dyn FnOnce() + Send + Sync>;

/// Liveness flag shared between a running task and its handle.
#[derive(Clone, Debug)]
pub struct Liveness(Arc<AtomicBool>);

impl Liveness {
    fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// False once the owning handle has been disposed.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn kill(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Owner side of a guarded task.
pub struct TaskHandle {
    liveness: Liveness,
    cleanups: Vec<Cleanup>,
}

impl TaskHandle {
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.liveness.is_live()
    }

    /// Register work to run when the handle is disposed.
    pub fn on_dispose(&mut self, cleanup: impl FnOnce() + Send + Sync + 'static) {
        self.cleanups.push(Box::new(cleanup));
    }

    /// Kill the task and run cleanups. Equivalent to dropping the handle.
    pub fn dispose(self) {}
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.liveness.kill();
        for cleanup in self.cleanups.drain(..) {
            cleanup();
        }
    }
}

impl std::fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskHandle")
            .field("live", &self.is_live())
            .field("cleanups", &self.cleanups.len())
            .finish()
    }
}

/// Holds at most one live task for a component; replacing or clearing the
/// slot disposes the previous task.
#[derive(Clone, Debug, Default)]
pub struct TaskSlot(Arc<Mutex<Option<TaskHandle>>>);

impl TaskSlot {
    pub fn replace(&self, handle: TaskHandle) {
        let previous = self.lock().replace(handle);
        drop(previous);
    }

    pub fn clear(&self) {
        let previous = self.lock().take();
        drop(previous);
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.lock().as_ref().is_some_and(TaskHandle::is_live)
    }

    fn lock(&self) -> MutexGuard<'_, Option<TaskHandle>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Build a guarded task. `body` receives the task's liveness flag; the
/// returned future still has to be spawned (see [`spawn`]).
pub fn guarded<F, Fut>(body: F) -> (Fut, TaskHandle)
where
    F: FnOnce(Liveness) -> Fut,
    Fut: Future<Output = ()>,
{
    let liveness = Liveness::new();
    let task = body(liveness.clone());
    (task, TaskHandle { liveness, cleanups: Vec::new() })
}

/// Run a future on the browser event loop.
///
/// Outside the browser (SSR, native tests) the future is dropped unpolled.
pub fn spawn<Fut>(task: Fut)
where
    Fut: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(task);
    #[cfg(not(feature = "hydrate"))]
    drop(task);
}
