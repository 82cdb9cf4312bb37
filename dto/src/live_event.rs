//! Frames exchanged on the live members channel.
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`.

use crate::member::Member;
use crate::member_input::MemberInput;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

pub const NEW_MEMBER_EVENT: &str = "nuevoAlumno";
pub const DELETE_MEMBER_EVENT: &str = "eliminarAlumno";

/// Server to client.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// The whole member list. Clients replace their local copy with it.
    #[serde(rename = "alumnos")]
    Members(Vec<Member>),
    /// Sent to the originating client only, once its mutation is applied.
    #[serde(rename = "ack")]
    Ack(Acknowledgement),
    /// Sent to the originating client only, when its event has been rejected.
    #[serde(rename = "error")]
    Error(EventError),
}

/// Client to server.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    #[serde(rename = "nuevoAlumno")]
    NewMember(MemberInput),
    #[serde(rename = "eliminarAlumno")]
    DeleteMember(String),
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::NewMember(_) => NEW_MEMBER_EVENT,
            ClientEvent::DeleteMember(_) => DELETE_MEMBER_EVENT,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Acknowledgement {
    event: String,
    id: String,
}

impl Acknowledgement {
    pub fn new(event: String, id: String) -> Self {
        Self { event, id }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum EventErrorKind {
    MalformedEvent,
    Validation,
    DuplicateKey,
    NotFound,
    StorageUnavailable,
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct EventError {
    /// Name of the rejected event, when it could be read.
    event: Option<String>,
    kind: EventErrorKind,
    message: String,
}

impl EventError {
    pub fn new(event: Option<String>, kind: EventErrorKind, message: String) -> Self {
        Self {
            event,
            kind,
            message,
        }
    }
}
