//! Metrics sink boundary.
//!
//! Compilation logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through MetricsEvent and MetricsSink.

use crate::{
    error::{ErrorClass, QueryError},
    obs::metrics,
};
use std::{cell::RefCell, rc::Rc};
use tracing::debug;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = const { RefCell::new(None) };
}

///
/// MetricsEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MetricsEvent {
    FilterCompiled {
        entity: &'static str,
        statements: u64,
    },
    SortCompiled {
        entity: &'static str,
    },
    CompileRejected {
        class: ErrorClass,
    },
    DescriptorBuilt {
        entity: &'static str,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: MetricsEvent);
}

/// GlobalMetricsSink
/// Default process-wide sink that writes into global metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: MetricsEvent) {
        match event {
            MetricsEvent::FilterCompiled { entity, statements } => {
                metrics::with_state_mut(|m| {
                    m.ops.filters_compiled = m.ops.filters_compiled.saturating_add(1);
                    m.ops.statements_compiled =
                        m.ops.statements_compiled.saturating_add(statements);

                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.filters_compiled = entry.filters_compiled.saturating_add(1);
                });
            }

            MetricsEvent::SortCompiled { entity } => {
                metrics::with_state_mut(|m| {
                    m.ops.sorts_compiled = m.ops.sorts_compiled.saturating_add(1);

                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.sorts_compiled = entry.sorts_compiled.saturating_add(1);
                });
            }

            MetricsEvent::CompileRejected { class } => {
                metrics::with_state_mut(|m| {
                    let counter = match class {
                        ErrorClass::Format => &mut m.ops.rejected_format,
                        ErrorClass::Schema => &mut m.ops.rejected_schema,
                        ErrorClass::Sequence => &mut m.ops.rejected_sequence,
                        ErrorClass::Unsupported => &mut m.ops.rejected_unsupported,
                        ErrorClass::Value => &mut m.ops.rejected_value,
                    };
                    *counter = counter.saturating_add(1);
                });
            }

            MetricsEvent::DescriptorBuilt { entity } => {
                metrics::with_state_mut(|m| {
                    m.ops.descriptors_built = m.ops.descriptors_built.saturating_add(1);

                    let entry = m.entities.entry(entity.to_string()).or_default();
                    entry.descriptors_built = entry.descriptors_built.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: MetricsEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => GLOBAL_METRICS_SINK.record(event),
    }
}

/// Count a compile rejection and hand the error back.
pub(crate) fn reject(err: QueryError) -> QueryError {
    record(MetricsEvent::CompileRejected { class: err.class() });
    debug!(class = %err.class(), error = %err, "query rejected");

    err
}

/// Route every event recorded on this thread to `sink` while `f` runs.
/// The previous sink is restored on return and on unwind.
pub fn with_metrics_sink<R>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> R) -> R {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let previous = self.0.take();
            SINK_OVERRIDE.with(|cell| *cell.borrow_mut() = previous);
        }
    }

    let previous = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(previous);

    f()
}

/// Snapshot the current metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state.
pub fn metrics_reset_all() {
    metrics::reset_all();
}
