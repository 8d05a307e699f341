use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use super::component::{LifecycleComponent, SignalReplay};
use super::error::ComponentError;
use crate::signal_processor::{GameSignal, SignalContext};

/// A registered component and the scheduler's view of whether it runs.
struct ManagedComponent {
    component: Box<dyn LifecycleComponent>,
    started: bool,
}

/// Outcome of one [`LifecycleScheduler::revalidate`] pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RevalidateReport {
    pub started: Vec<&'static str>,
    pub stopped: Vec<&'static str>,
    /// Components whose start or stop failed. A failed stop is also listed
    /// in `stopped`.
    pub failed: Vec<&'static str>,
}

impl RevalidateReport {
    /// True if the pass made no start/stop calls
    pub fn is_empty(&self) -> bool {
        self.started.is_empty() && self.stopped.is_empty() && self.failed.is_empty()
    }
}

/// Owns the registered feature modules and their started flags.
///
/// Every start/stop/signal call into a component is isolated: an error or a
/// panic is logged and only affects that component's own bookkeeping.
pub struct LifecycleScheduler {
    components: Vec<ManagedComponent>,
}

impl LifecycleScheduler {
    pub fn new(components: Vec<Box<dyn LifecycleComponent>>) -> Self {
        Self {
            components: components
                .into_iter()
                .map(|component| ManagedComponent {
                    component,
                    started: false,
                })
                .collect(),
        }
    }

    /// Start or stop components so each one runs exactly when its predicate
    /// holds. Components that are already in the desired state are untouched.
    pub fn revalidate(
        &mut self,
        ctx: &SignalContext<'_>,
        replay: &dyn SignalReplay,
    ) -> RevalidateReport {
        let mut report = RevalidateReport::default();

        for idx in 0..self.components.len() {
            let missing = self.missing_dependency(idx);
            let entry = &mut self.components[idx];
            let name = entry.component.name();
            let desired = panic::catch_unwind(AssertUnwindSafe(|| {
                entry.component.is_enabled(ctx.config, ctx.state)
            }))
            .unwrap_or_else(|_| {
                tracing::error!(component = name, "Predicate panicked, treating as disabled");
                false
            });

            if desired == entry.started {
                continue;
            }

            if desired {
                if let Some(dependency) = missing {
                    let err = ComponentError::MissingDependency {
                        component: name,
                        dependency,
                    };
                    tracing::error!(component = name, error = %err, "Failed to start component");
                    report.failed.push(name);
                    continue;
                }
                match run_guarded(|| entry.component.start()) {
                    Ok(()) => {
                        entry.started = true;
                        tracing::debug!(component = name, "Component started");

                        let replayed = panic::catch_unwind(AssertUnwindSafe(|| {
                            replay.replay(entry.component.as_mut(), ctx)
                        }));
                        if let Err(payload) = replayed {
                            fault(entry, &panic_message(payload.as_ref()));
                            report.failed.push(name);
                            continue;
                        }
                        report.started.push(name);
                    }
                    Err(reason) => {
                        tracing::error!(component = name, error = %reason, "Failed to start component");
                        report.failed.push(name);
                    }
                }
            } else {
                if let Err(reason) = run_guarded(|| entry.component.stop()) {
                    tracing::error!(component = name, error = %reason, "Failed to stop component");
                    report.failed.push(name);
                }
                entry.started = false;
                tracing::debug!(component = name, "Component stopped");
                report.stopped.push(name);
            }
        }

        report
    }

    /// First dependency of the component at `idx` that is not running
    fn missing_dependency(&self, idx: usize) -> Option<&'static str> {
        self.components[idx]
            .component
            .dependencies()
            .iter()
            .copied()
            .find(|dependency| !self.is_started(dependency))
    }

    /// Stop every started component. Used at shutdown.
    pub fn halt_all(&mut self) -> usize {
        let mut halted = 0;
        for entry in self.components.iter_mut().filter(|e| e.started) {
            let name = entry.component.name();
            if let Err(reason) = run_guarded(|| entry.component.stop()) {
                tracing::error!(component = name, error = %reason, "Failed to stop component");
            }
            halted += 1;
        }
        for entry in &mut self.components {
            entry.started = false;
        }
        halted
    }

    /// Deliver a signal to every started component.
    ///
    /// A component that panics while handling it is stopped.
    pub fn dispatch(&mut self, signal: &GameSignal, ctx: &SignalContext<'_>) {
        for entry in self.components.iter_mut().filter(|e| e.started) {
            let handled = panic::catch_unwind(AssertUnwindSafe(|| {
                entry.component.handle_signal(signal, ctx)
            }));
            if let Err(payload) = handled {
                fault(entry, &panic_message(payload.as_ref()));
            }
        }
    }

    /// Borrow a started component by concrete type.
    pub fn find<T: 'static>(&self) -> Option<&T> {
        self.components
            .iter()
            .filter(|e| e.started)
            .find_map(|e| e.component.as_any().downcast_ref::<T>())
    }

    pub fn is_started(&self, name: &str) -> bool {
        self.components
            .iter()
            .any(|e| e.started && e.component.name() == name)
    }

    /// Names of started components, in registration order
    pub fn active_components(&self) -> Vec<&'static str> {
        self.started().map(|c| c.name()).collect()
    }

    pub fn started(&self) -> impl Iterator<Item = &dyn LifecycleComponent> {
        self.components
            .iter()
            .filter(|e| e.started)
            .map(|e| e.component.as_ref())
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Stop a component that faulted outside start/stop and clear its flag.
fn fault(entry: &mut ManagedComponent, reason: &str) {
    let name = entry.component.name();
    tracing::error!(component = name, error = %reason, "Component faulted, stopping it");
    if let Err(reason) = run_guarded(|| entry.component.stop()) {
        tracing::error!(component = name, error = %reason, "Failed to stop component");
    }
    entry.started = false;
}

fn run_guarded(f: impl FnOnce() -> Result<(), ComponentError>) -> Result<(), String> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {msg}")
    } else {
        "panicked".to_string()
    }
}
