//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Driver`]: Platform-specific I/O
//! - the module lifecycle, observed through a [`watch::Receiver`]

use artr_core::{ModuleSnapshot, invoke};
use tokio::sync::watch;

use crate::{App, AppAction, AppEvent, Driver};

/// Generic runtime that orchestrates App, Driver and module lifecycle.
///
/// Lifecycle publications are pushed into the App as
/// [`AppEvent::ModuleUpdated`] as soon as they happen, so a page rendered
/// while the module was loading re-renders once it is ready.
pub struct Runtime<D: Driver> {
    driver: D,
    app: App,
    modules: watch::Receiver<ModuleSnapshot>,
}

impl<D: Driver> Runtime<D> {
    /// Create a new runtime with the given driver and lifecycle subscription.
    pub fn new(driver: D, modules: watch::Receiver<ModuleSnapshot>) -> Self {
        Self { driver, app: App::new(), modules }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Renders the initial state with the current module snapshot
    /// 2. Waits for either a driver event or a lifecycle publication
    /// 3. Processes the resulting actions, running transforms inline
    ///
    /// Returns the final App state when the driver closes or the App quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<App, D::Error> {
        let initial = self.modules.borrow_and_update().clone();
        let _ = self.app.handle(AppEvent::ModuleUpdated(initial));
        self.driver.render(&self.app)?;

        let mut lifecycle_open = true;

        loop {
            let event = tokio::select! {
                biased;

                changed = self.modules.changed(), if lifecycle_open => {
                    if changed.is_err() {
                        tracing::debug!("module lifecycle publisher dropped");
                        lifecycle_open = false;
                        continue;
                    }
                    let snapshot = self.modules.borrow_and_update().clone();
                    AppEvent::ModuleUpdated(snapshot)
                },
                event = self.driver.poll_event() => match event? {
                    Some(event) => event,
                    None => break,
                },
            };

            if self.process_event(event)? {
                break;
            }
        }

        self.driver.stop();
        Ok(self.app)
    }

    /// Process one event and every action it leads to.
    ///
    /// Returns `true` if the application should quit.
    fn process_event(&mut self, event: AppEvent) -> Result<bool, D::Error> {
        let mut pending_actions = self.app.handle(event);

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),
                    AppAction::Transform { direction, input } => {
                        let snapshot = self.modules.borrow().clone();
                        let result = invoke(direction, &input, &snapshot);
                        let new_actions =
                            self.app.handle(AppEvent::TransformCompleted { direction, result });
                        pending_actions.extend(new_actions);
                    },
                }
            }
        }

        Ok(false)
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }
}
