//! # bluff-sync
//!
//! Connection manager and message routing for the bluff realtime layer.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `config` | Host/scheme settings, transport address derivation |
//! | `error` | `SyncError` taxonomy |
//! | `page` | Injected accessor for the current page identity |
//! | `transport` | `Connector`/`Transport` seams, tokio-tungstenite impl |
//! | `manager` | `SyncManager`: lifecycle state machine, registry, dispatch |
//!
//! ## Data Flow
//!
//! `SyncManager::connect` spawns one driver task that owns the transport.
//! Inbound text frames are decoded and dispatched to the handler registered
//! for the page identity read at that moment; outbound events flow through
//! `SyncManager::send` into the same driver, preserving call order.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod manager;
pub mod page;
pub mod transport;

pub use config::SyncConfig;
pub use error::SyncError;
pub use manager::{ConnectionState, SyncManager};
pub use page::{FixedPage, PageContext};
pub use transport::{Connector, Transport, TransportRx, TransportTx, WsConnector};
