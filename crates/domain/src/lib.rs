//! # gatehub-domain
//!
//! Pure domain model for devices exposed by a home-automation gateway.
//!
//! ## Responsibilities
//! - Foundational types: numeric device identifiers, error conventions, timestamps
//! - Define **field values** (the JSON scalars a gateway reports)
//! - Define **snapshots** (open field-name → value mappings, merged field by field)
//! - Define the **device record** (cached snapshot + shared transport handle + typed accessors)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app` or external IO crates.
//! The transport is expressed as a trait in the `app` crate (ports); the
//! record only stores a handle to it.

pub mod error;
pub mod id;
pub mod time;

pub mod device;
pub mod fields;
pub mod snapshot;
pub mod value;
