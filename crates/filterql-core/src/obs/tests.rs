use super::*;
use crate::{
    error::ErrorClass,
    query::QueryString,
    test_fixtures::TestModel,
};
use std::{cell::RefCell, rc::Rc};

///
/// CapturingSink
///

#[derive(Default)]
struct CapturingSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CapturingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

fn capture(f: impl FnOnce()) -> Vec<MetricsEvent> {
    let sink = Rc::new(CapturingSink::default());
    with_metrics_sink(sink.clone(), f);

    sink.events.take()
}

#[test]
fn compiled_filter_emits_statement_count() {
    let events = capture(|| {
        let query = QueryString::<TestModel>::new();
        query
            .filter("page gt 1 and page lt 3")
            .expect("filter should compile");
    });

    assert!(events.contains(&MetricsEvent::FilterCompiled {
        entity: "TestModel",
        statements: 2,
    }));
}

#[test]
fn rejection_is_classified() {
    let events = capture(|| {
        let query = QueryString::<TestModel>::new();
        let _ = query.filter("nosuch eq 1");
        let _ = query.sort("page sideways");
    });

    assert!(events.contains(&MetricsEvent::CompileRejected {
        class: ErrorClass::Schema
    }));
    assert!(events.contains(&MetricsEvent::CompileRejected {
        class: ErrorClass::Format
    }));
}

#[test]
fn sort_compilation_is_recorded() {
    let events = capture(|| {
        QueryString::<TestModel>::new()
            .sort("lastname desc, name")
            .expect("sort should compile");
    });

    let sorts = events
        .iter()
        .filter(|event| matches!(event, MetricsEvent::SortCompiled { .. }))
        .count();
    assert_eq!(sorts, 1);
    assert!(events.contains(&MetricsEvent::SortCompiled {
        entity: "TestModel"
    }));
}

#[test]
fn override_is_scoped() {
    let sink = Rc::new(CapturingSink::default());
    with_metrics_sink(sink.clone(), || {});

    // outside the scope events go to the global sink again
    let _ = QueryString::<TestModel>::new().sort("page");
    assert!(sink.events.borrow().is_empty());
}

#[test]
fn global_sink_counts_rejections() {
    let before = metrics_report().ops.rejected_sequence;

    let _ = crate::statement::FilterBuilder::<TestModel>::new().and();

    assert!(metrics_report().ops.rejected_sequence > before);
}
