//! Event sink and emitted-event catalogue.
//!
//! String-typed events with string-keyed attributes, matching `spec.md`
//! §6's catalogue exactly. The host runtime supplies an `EventSink`
//! implementation (e.g. writing into its own event log); `swap-core` only
//! builds the attribute maps and hands them off.

use std::collections::BTreeMap;

use crate::swap::Direction;

/// One emitted event: a type tag plus its attributes, in catalogue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub event_type: &'static str,
    pub attributes: BTreeMap<&'static str, String>,
}

/// Collaborator the engine/expirer emit events through.
pub trait EventSink {
    fn emit(&mut self, event: Event);
}

/// An `EventSink` that drops everything — useful for tests that don't care
/// about emitted events.
#[derive(Debug, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&mut self, _event: Event) {}
}

/// An `EventSink` that records events for later inspection, used by tests.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    pub events: Vec<Event>,
}

impl EventSink for RecordingEventSink {
    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}

fn attrs(pairs: &[(&'static str, String)]) -> BTreeMap<&'static str, String> {
    pairs.iter().cloned().collect()
}

#[allow(clippy::too_many_arguments)]
pub fn create_atomic_swap(
    sender: &str,
    recipient: &str,
    atomic_swap_id: &str,
    random_number_hash: &str,
    timestamp: u64,
    sender_other_chain: &str,
    expire_timestamp: u64,
    amount: u64,
    direction: Direction,
) -> Event {
    Event {
        event_type: "create_atomic_swap",
        attributes: attrs(&[
            ("sender", sender.to_string()),
            ("recipient", recipient.to_string()),
            ("atomic_swap_id", atomic_swap_id.to_string()),
            ("random_number_hash", random_number_hash.to_string()),
            ("timestamp", timestamp.to_string()),
            ("sender_other_chain", sender_other_chain.to_string()),
            ("expire_timestamp", expire_timestamp.to_string()),
            ("amount", amount.to_string()),
            ("direction", direction.to_string()),
        ]),
    }
}

pub fn claim_atomic_swap(
    claim_sender: &str,
    recipient: &str,
    atomic_swap_id: &str,
    random_number_hash: &str,
    random_number: &str,
) -> Event {
    Event {
        event_type: "claim_atomic_swap",
        attributes: attrs(&[
            ("claim_sender", claim_sender.to_string()),
            ("recipient", recipient.to_string()),
            ("atomic_swap_id", atomic_swap_id.to_string()),
            ("random_number_hash", random_number_hash.to_string()),
            ("random_number", random_number.to_string()),
        ]),
    }
}

pub fn refund_atomic_swap(refund_sender: &str, sender: &str, atomic_swap_id: &str, random_number_hash: &str) -> Event {
    Event {
        event_type: "refund_atomic_swap",
        attributes: attrs(&[
            ("refund_sender", refund_sender.to_string()),
            ("sender", sender.to_string()),
            ("atomic_swap_id", atomic_swap_id.to_string()),
            ("random_number_hash", random_number_hash.to_string()),
        ]),
    }
}

pub fn swaps_expired(atomic_swap_ids: &[String], expiration_block: u64) -> Event {
    Event {
        event_type: "swaps_expired",
        attributes: attrs(&[
            ("atomic_swap_ids", atomic_swap_ids.join(",")),
            ("expiration_block", expiration_block.to_string()),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_event_has_all_attributes() {
        let event = create_atomic_swap(
            "sender",
            "recipient",
            "id",
            "hash",
            123,
            "other",
            456,
            789,
            Direction::Incoming,
        );
        assert_eq!(event.event_type, "create_atomic_swap");
        assert_eq!(event.attributes.len(), 9);
        assert_eq!(event.attributes.get("direction").unwrap(), "incoming");
    }

    #[test]
    fn recording_sink_preserves_order() {
        let mut sink = RecordingEventSink::default();
        sink.emit(swaps_expired(&["a".into(), "b".into()], 100));
        assert_eq!(sink.events.len(), 1);
        assert_eq!(sink.events[0].attributes.get("atomic_swap_ids").unwrap(), "a,b");
    }
}
