//! Fedflow Core
//!
//! Core types for talking to a federated-learning job orchestrator through
//! its command-line client.
//!
//! This crate contains:
//! - Domain types: job status and the views extracted from status records
//! - DTOs: the response envelope the flow client prints and the typed
//!   results the client façade returns

pub mod domain;
pub mod dto;
