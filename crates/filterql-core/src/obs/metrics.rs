use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    sync::{LazyLock, Mutex, PoisonError},
    time::{SystemTime, UNIX_EPOCH},
};

static STATE: LazyLock<Mutex<EventState>> = LazyLock::new(|| Mutex::new(EventState::default()));

///
/// EventState
/// Ephemeral, in-memory counters for compile operations.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub(crate) struct EventState {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
    pub since_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            entities: BTreeMap::new(),
            since_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    pub filters_compiled: u64,
    pub sorts_compiled: u64,
    pub statements_compiled: u64,
    pub descriptors_built: u64,

    // Rejections by error class
    pub rejected_format: u64,
    pub rejected_schema: u64,
    pub rejected_sequence: u64,
    pub rejected_unsupported: u64,
    pub rejected_value: u64,
}

///
/// EntityCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityCounters {
    pub filters_compiled: u64,
    pub sorts_compiled: u64,
    pub descriptors_built: u64,
}

///
/// EventReport
/// Point-in-time copy of the counters.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
    pub entities: BTreeMap<String, EntityCounters>,
    pub since_ms: u64,
}

pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    let mut state = STATE.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut state)
}

pub(crate) fn report() -> EventReport {
    with_state_mut(|state| EventReport {
        ops: state.ops.clone(),
        entities: state.entities.clone(),
        since_ms: state.since_ms,
    })
}

pub(crate) fn reset_all() {
    with_state_mut(|state| *state = EventState::default());
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
        })
}
