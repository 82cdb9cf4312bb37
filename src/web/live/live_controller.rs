use crate::live::registry::SubscriberId;
use crate::live::session;
use crate::member::service::MemberService;
use crate::web::cors::AllowedOrigin;
use dto::live_event::ServerEvent;
use log::{debug, error, info};
use rocket::State;
use rocket::futures::stream::SplitSink;
use rocket::futures::{SinkExt, StreamExt};
use rocket_ws::stream::DuplexStream;
use rocket_ws::{Channel, Message, WebSocket};

/// Live member channel.
/// The connection gets the member list right away, then again after every mutation.
/// Clients may send `nuevoAlumno` and `eliminarAlumno` events.
#[get("/ws")]
pub fn live_members(
    _origin: AllowedOrigin,
    ws: WebSocket,
    service: &State<MemberService>,
) -> Channel<'static> {
    let service = service.inner().clone();

    ws.channel(move |stream| {
        Box::pin(async move {
            let (mut sink, mut stream) = stream.split();
            let (subscriber, mut outbound) = service.registry().subscribe();
            info!(
                "Live client connected [id: {subscriber}, subscribers: {}]",
                service.registry().len()
            );
            session::on_connect(&service, &subscriber);

            let result = loop {
                rocket::tokio::select! {
                    event = outbound.recv() => match event {
                        Some(event) => {
                            if let Err(error) = send_event(&mut sink, &subscriber, &event).await {
                                break Err(error);
                            }
                        }
                        None => break Ok(()),
                    },
                    message = stream.next() => match message {
                        Some(Ok(Message::Text(frame))) => {
                            session::on_message(&service, &subscriber, &frame);
                        }
                        Some(Ok(Message::Close(_))) | None => break Ok(()),
                        Some(Ok(_)) => {}
                        Some(Err(error)) => break Err(error),
                    },
                }
            };

            service.registry().unsubscribe(&subscriber);
            match &result {
                Ok(()) => info!("Live client disconnected [id: {subscriber}]"),
                Err(error) => info!("Live client lost [id: {subscriber}]\n{error}"),
            }

            result
        })
    })
}

async fn send_event(
    sink: &mut SplitSink<DuplexStream, Message>,
    subscriber: &SubscriberId,
    event: &ServerEvent,
) -> rocket_ws::result::Result<()> {
    match serde_json::to_string(event) {
        Ok(frame) => {
            debug!("Sending live event [id: {subscriber}]");
            sink.send(Message::Text(frame)).await
        }
        Err(error) => {
            error!("Can't serialize live event [id: {subscriber}]\n{error:#?}");
            Ok(())
        }
    }
}
