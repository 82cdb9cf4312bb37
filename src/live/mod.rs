//! Live members channel.
//!
//! Each connected client is a subscriber of the [registry::SubscriberRegistry].
//! On connection, the subscriber receives the full member list.
//! After every mutation, whatever its origin, the full list is broadcast to all subscribers,
//! so that every client converges to the same state without any merge logic.

pub mod registry;
pub mod session;
