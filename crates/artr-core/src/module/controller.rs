//! Module lifecycle controller.

use std::sync::Arc;

use tokio::sync::watch;

use super::{ModuleLoader, ModuleSnapshot, ModuleState, TransformModule};

/// Loads a transform module once and publishes its lifecycle.
///
/// Publication is a [`watch`] channel: the load task is the only writer after
/// [`start`](Self::start), every reader sees a whole [`ModuleSnapshot`], and
/// subscribers are woken on each change instead of polling.
///
/// # Invariants
///
/// - The state sequence is `Unloaded → Loading → Ready`, never backwards.
/// - The loader runs at most once per controller.
/// - `Ready` is published together with the module in one replacement.
///
/// A failed load is logged and leaves the snapshot at `Loading`; there is no
/// failure state and no retry.
pub struct ModuleLifecycleController<L> {
    loader: Arc<L>,
    publisher: Arc<watch::Sender<ModuleSnapshot>>,
}

impl<L: ModuleLoader> ModuleLifecycleController<L> {
    /// Create a controller in the `Unloaded` state.
    pub fn new(loader: L) -> Self {
        let (publisher, _) = watch::channel(ModuleSnapshot::Unloaded);
        Self { loader: Arc::new(loader), publisher: Arc::new(publisher) }
    }

    /// Begin loading the module in the background.
    ///
    /// Transitions `Unloaded → Loading` and spawns the load on the current
    /// tokio runtime. Returns `true` if this call started the load; later
    /// calls are no-ops returning `false`.
    ///
    /// Outside a tokio runtime nothing is spawned: the error is logged, the
    /// state stays `Unloaded`, and `false` is returned.
    pub fn start(&self) -> bool {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::error!("module load requested outside a tokio runtime");
            return false;
        };

        let started = self.publisher.send_if_modified(|snapshot| {
            if snapshot.state() == ModuleState::Unloaded {
                *snapshot = ModuleSnapshot::Loading;
                true
            } else {
                false
            }
        });

        if !started {
            tracing::debug!(state = %self.state(), "module load already started");
            return false;
        }

        tracing::debug!("module load started");

        let loader = Arc::clone(&self.loader);
        let publisher = Arc::clone(&self.publisher);
        runtime.spawn(async move {
            match loader.load().await {
                Ok(module) => {
                    publisher.send_modify(|snapshot| {
                        debug_assert_eq!(snapshot.state(), ModuleState::Loading);
                        *snapshot = ModuleSnapshot::Ready(module);
                    });
                    tracing::info!("transform module ready");
                },
                Err(err) => {
                    tracing::error!(error = %err, "transform module failed to load");
                },
            }
        });

        true
    }

    /// Latest published snapshot.
    pub fn current(&self) -> ModuleSnapshot {
        self.publisher.borrow().clone()
    }

    /// Latest published state.
    pub fn state(&self) -> ModuleState {
        self.publisher.borrow().state()
    }

    /// Subscribe to snapshot changes.
    ///
    /// The receiver starts at the current snapshot; `changed()` resolves on
    /// each later publication.
    pub fn subscribe(&self) -> watch::Receiver<ModuleSnapshot> {
        self.publisher.subscribe()
    }

    /// Wait until the module is ready.
    ///
    /// Never resolves if the load failed. Returns `None` only if the
    /// publisher is gone, which cannot happen while `self` is alive.
    pub async fn wait_ready(&self) -> Option<Arc<dyn TransformModule>> {
        let mut receiver = self.subscribe();
        let snapshot = receiver.wait_for(ModuleSnapshot::is_ready).await.ok()?;
        snapshot.module().cloned()
    }
}

impl<L> std::fmt::Debug for ModuleLifecycleController<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleLifecycleController")
            .field("snapshot", &*self.publisher.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    use tokio::sync::Notify;

    use super::*;
    use crate::{LoadError, TransformError};

    struct Upper;

    impl TransformModule for Upper {
        fn encode(&self, input: &str) -> Result<String, TransformError> {
            Ok(input.to_uppercase())
        }

        fn decode(&self, input: &str) -> Result<String, TransformError> {
            Ok(input.to_lowercase())
        }
    }

    /// Loader that blocks until released and counts its invocations.
    #[derive(Default)]
    struct GatedLoader {
        gate: Arc<Notify>,
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl ModuleLoader for GatedLoader {
        async fn load(&self) -> Result<Arc<dyn TransformModule>, LoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            if self.fail {
                return Err(LoadError::Fetch("unreachable".to_string()));
            }
            Ok(Arc::new(Upper))
        }
    }

    #[tokio::test]
    async fn starts_unloaded() {
        let controller = ModuleLifecycleController::new(GatedLoader::default());
        assert_eq!(controller.state(), ModuleState::Unloaded);
        assert!(controller.current().module().is_none());
    }

    #[tokio::test]
    async fn start_loads_then_publishes_ready() {
        let loader = GatedLoader::default();
        let gate = Arc::clone(&loader.gate);
        let controller = ModuleLifecycleController::new(loader);

        assert!(controller.start());
        assert_eq!(controller.state(), ModuleState::Loading);

        gate.notify_one();
        let module = tokio::time::timeout(Duration::from_secs(1), controller.wait_ready())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(module.encode("abc").unwrap(), "ABC");
        assert_eq!(controller.state(), ModuleState::Ready);
    }

    #[tokio::test]
    async fn second_start_is_noop() {
        let loader = GatedLoader::default();
        let calls = Arc::clone(&loader.calls);
        let gate = Arc::clone(&loader.gate);
        let controller = ModuleLifecycleController::new(loader);

        assert!(controller.start());
        assert!(!controller.start());

        gate.notify_one();
        let _ = tokio::time::timeout(Duration::from_secs(1), controller.wait_ready()).await;
        assert!(!controller.start());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(controller.state(), ModuleState::Ready);
    }

    #[test]
    fn start_without_runtime_stays_unloaded() {
        let loader = GatedLoader::default();
        let calls = Arc::clone(&loader.calls);
        let controller = ModuleLifecycleController::new(loader);

        assert!(!controller.start());
        assert_eq!(controller.state(), ModuleState::Unloaded);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            assert!(controller.start());
            assert_eq!(controller.state(), ModuleState::Loading);
        });
    }

    #[tokio::test]
    async fn failed_load_stays_loading() {
        let loader = GatedLoader { fail: true, ..GatedLoader::default() };
        let gate = Arc::clone(&loader.gate);
        let controller = ModuleLifecycleController::new(loader);
        let mut receiver = controller.subscribe();

        controller.start();
        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow_and_update().state(), ModuleState::Loading);

        gate.notify_one();
        let waited = tokio::time::timeout(Duration::from_millis(50), controller.wait_ready()).await;

        assert!(waited.is_err(), "failed load must never publish ready");
        assert_eq!(controller.state(), ModuleState::Loading);
        assert!(controller.current().module().is_none());
    }
}
