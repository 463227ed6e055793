//! # gatehub-app
//!
//! Application layer — the **transport port**, the **device capability** and
//! the **device registry** use-case.
//!
//! ## Responsibilities
//! - Define the port trait the gateway client must implement:
//!   - `Transport` — fetch a device's state, send a new value
//! - Define the polymorphic `Device` capability (`set_value`, `refresh`)
//!   that concrete device kinds implement on top of a domain record
//! - Own the records of an integration in a `DeviceRegistry`, routing
//!   gateway updates and refresh sweeps to them
//!
//! ## Dependency rule
//! Depends on `gatehub-domain` only. Never imports the gateway client.
//! The client depends on *this* crate, not the reverse.

pub mod config;
pub mod device;
pub mod error;
pub mod ports;
pub mod registry;
