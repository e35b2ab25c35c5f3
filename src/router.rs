/// Message relay between embedded frames and the enclosing page
use std::fmt;

use log::{debug, warn};
use serde_json::Value;

use crate::Result;
use crate::entry::EntryId;
use crate::workspace::Workspace;

pub const SOURCE_ID_FIELD: &str = "_sourceAppId";
pub const SOURCE_URL_FIELD: &str = "_sourceAppUrl";
pub const TARGET_ID_FIELD: &str = "_targetAppId";

const ROUTING_FIELDS: [&str; 3] = [SOURCE_ID_FIELD, SOURCE_URL_FIELD, TARGET_ID_FIELD];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Child(EntryId),
    Parent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Parent,
    Frame(EntryId),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Parent => write!(f, "parent"),
            Destination::Frame(id) => write!(f, "app {}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delivery<P = Value> {
    pub destination: Destination,
    pub payload: P,
}

/// An inbound message as the router sees it. Only the routing fields are
/// ever read; everything else is carried through untouched.
pub trait Payload: Clone {
    /// `null` or `undefined`
    fn is_blank(&self) -> bool;

    /// Whether routing fields can be attached to or read from it
    fn is_record(&self) -> bool;

    fn routing_field(&self, key: &str) -> Option<Value>;

    /// A copy carrying the source entry's id and address
    fn tagged(&self, id: EntryId, address: &str) -> Option<Self>;

    /// A copy without any routing field
    fn stripped(&self) -> Self;
}

impl Payload for Value {
    fn is_blank(&self) -> bool {
        self.is_null()
    }

    fn is_record(&self) -> bool {
        self.is_object()
    }

    fn routing_field(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }

    fn tagged(&self, id: EntryId, address: &str) -> Option<Self> {
        let mut fields = self.as_object()?.clone();
        fields.insert(SOURCE_ID_FIELD.to_string(), Value::from(id));
        fields.insert(SOURCE_URL_FIELD.to_string(), Value::from(address));
        Some(Value::Object(fields))
    }

    fn stripped(&self) -> Self {
        let mut clean = self.clone();
        if let Value::Object(fields) = &mut clean {
            for key in ROUTING_FIELDS {
                fields.remove(key);
            }
        }
        clean
    }
}

/// Where deliveries are actually posted
pub trait MessageSink<P = Value> {
    fn post(&self, destination: Destination, payload: &P) -> Result<()>;
}

/// `source` is the entry whose frame window sent the message, if the host
/// recognised one. Only an entry that still owns a live frame counts.
pub fn classify(workspace: &Workspace, source: Option<EntryId>) -> Origin {
    match source.and_then(|id| workspace.entry(id)) {
        Some(entry) if entry.has_frame() => Origin::Child(entry.id),
        _ => Origin::Parent,
    }
}

pub fn route<P: Payload>(workspace: &Workspace, origin: Origin, payload: P) -> Vec<Delivery<P>> {
    match origin {
        Origin::Child(id) => route_from_child(workspace, id, &payload)
            .into_iter()
            .collect(),
        Origin::Parent => route_from_parent(workspace, payload),
    }
}

fn route_from_child<P: Payload>(
    workspace: &Workspace,
    id: EntryId,
    payload: &P,
) -> Option<Delivery<P>> {
    let entry = workspace.entry(id)?;
    let tagged = payload
        .is_record()
        .then(|| payload.tagged(entry.id, &entry.address))
        .flatten();
    let Some(payload) = tagged else {
        debug!("Ignoring non-object message from app {}", id);
        return None;
    };

    Some(Delivery {
        destination: Destination::Parent,
        payload,
    })
}

fn route_from_parent<P: Payload>(workspace: &Workspace, payload: P) -> Vec<Delivery<P>> {
    if payload.is_blank() {
        return Vec::new();
    }

    if payload.is_record() {
        if let Some(addressed) = addressed_field(&payload) {
            return route_targeted(workspace, &addressed, &payload)
                .into_iter()
                .collect();
        }
    }

    workspace
        .entries()
        .iter()
        .filter(|e| e.enabled && e.has_frame())
        .map(|e| Delivery {
            destination: Destination::Frame(e.id),
            payload: payload.clone(),
        })
        .collect()
}

/// The target field wins over an echoed source field; falsy values count as absent
fn addressed_field(payload: &impl Payload) -> Option<Value> {
    [TARGET_ID_FIELD, SOURCE_ID_FIELD]
        .iter()
        .filter_map(|key| payload.routing_field(key))
        .find(is_truthy)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn route_targeted<P: Payload>(
    workspace: &Workspace,
    addressed: &Value,
    payload: &P,
) -> Option<Delivery<P>> {
    let target = parse_entry_id(addressed).and_then(|id| workspace.entry(id));
    let Some(entry) = target.filter(|e| e.has_frame()) else {
        debug!("Dropping message for unknown or unloaded app {}", addressed);
        return None;
    };

    Some(Delivery {
        destination: Destination::Frame(entry.id),
        payload: payload.stripped(),
    })
}

fn parse_entry_id(value: &Value) -> Option<EntryId> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|id| EntryId::try_from(id).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Post every delivery; one failure never stops the rest
pub fn deliver<P>(sink: &impl MessageSink<P>, deliveries: Vec<Delivery<P>>) -> usize {
    let mut delivered = 0;
    for delivery in deliveries {
        match sink.post(delivery.destination, &delivery.payload) {
            Ok(()) => delivered += 1,
            Err(e) => warn!("{}", e),
        }
    }
    delivered
}

/// Classify, route and deliver one inbound message
pub fn relay<P: Payload>(
    workspace: &Workspace,
    sink: &impl MessageSink<P>,
    source: Option<EntryId>,
    payload: P,
) -> usize {
    let origin = classify(workspace, source);
    let deliveries = route(workspace, origin, payload);
    deliver(sink, deliveries)
}
