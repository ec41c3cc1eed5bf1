//! # dv-core
//!
//! Core types shared by every datviz crate.
//!
//! This crate provides:
//! - Entity structs for server-owned objects (projects, users, activity logs)
//! - Session payloads produced by the remote service (column sets, upload
//!   previews, issue summaries)
//! - Status enums with their string forms
//! - Response envelopes for the remote API
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;

pub use errors::CoreError;
