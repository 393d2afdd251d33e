//! # bluff-core
//!
//! Foundation types for the bluff realtime sync layer.
//!
//! This crate provides the shared vocabulary the sync crates depend on:
//!
//! - **Branded IDs**: [`ids::GameId`] newtype for the active game session
//! - **Page identities**: [`pages::PageIdentity`], the finite set of
//!   server-rendered views that can register an inbound-message handler
//! - **Messages**: [`messages::InboundMessage`] (permissive untagged union
//!   of server pushes) and [`messages::OutboundEvent`] (client events tagged
//!   by `event_type`)
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `bluff-sync` and `bluff-client`. No I/O.

#![deny(unsafe_code)]

pub mod ids;
pub mod messages;
pub mod pages;

pub use ids::GameId;
pub use messages::{Guess, InboundMessage, OutboundEvent, Vote};
pub use pages::{PageIdentity, UnknownPageIdentity};
