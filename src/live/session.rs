use crate::live::registry::SubscriberId;
use crate::member::error::MemberError;
use crate::member::service::MemberService;
use dto::live_event::{Acknowledgement, ClientEvent, EventError, EventErrorKind, ServerEvent};
use log::{debug, error, info, warn};

/// Greet a new subscriber with the current member list. Nobody else is notified.
pub fn on_connect(service: &MemberService, subscriber: &SubscriberId) {
    match service.list(None) {
        Ok(members) => {
            service
                .registry()
                .send_to(subscriber, ServerEvent::Members(members));
        }
        Err(error) => {
            error!("Can't load members for a new subscriber [id: {subscriber}]\n{error:#?}");
            service
                .registry()
                .send_to(subscriber, error_event(None, &error));
        }
    }
}

/// Handle one text frame sent by `subscriber`.
/// Acknowledgements and errors go back to the sender only.
/// The member list reaches everybody through the service's broadcast.
pub fn on_message(service: &MemberService, subscriber: &SubscriberId, frame: &str) {
    let event = match serde_json::from_str::<ClientEvent>(frame) {
        Ok(event) => event,
        Err(parse_error) => {
            warn!("Malformed event [subscriber: {subscriber}]\n{parse_error}");
            service.registry().send_to(
                subscriber,
                ServerEvent::Error(EventError::new(
                    None,
                    EventErrorKind::MalformedEvent,
                    parse_error.to_string(),
                )),
            );
            return;
        }
    };

    let name = event.name();
    debug!("Event received [subscriber: {subscriber}, event: {name}]");
    let result = match event {
        ClientEvent::NewMember(input) => service.create(input).map(|member| member.id().clone()),
        ClientEvent::DeleteMember(id) => service.delete(&id).map(|_| id),
    };

    let reply = match result {
        Ok(id) => {
            info!("Event applied [subscriber: {subscriber}, event: {name}, id: {id}]");
            ServerEvent::Ack(Acknowledgement::new(name.to_owned(), id))
        }
        Err(error) => {
            warn!("Event rejected [subscriber: {subscriber}, event: {name}]\n{error}");
            error_event(Some(name), &error)
        }
    };
    service.registry().send_to(subscriber, reply);
}

fn error_event(event: Option<&str>, error: &MemberError) -> ServerEvent {
    ServerEvent::Error(EventError::new(
        event.map(str::to_owned),
        error_kind(error),
        error.to_string(),
    ))
}

fn error_kind(error: &MemberError) -> EventErrorKind {
    match error {
        MemberError::Validation(_) => EventErrorKind::Validation,
        MemberError::DuplicateKey => EventErrorKind::DuplicateKey,
        MemberError::NotFound(_) => EventErrorKind::NotFound,
        MemberError::StorageUnavailable(_) => EventErrorKind::StorageUnavailable,
    }
}
