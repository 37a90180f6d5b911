//! Core domain types
//!
//! This module contains the domain structures shared between the client
//! façade and the CLI front end. The orchestrator owns all state; these
//! types only describe what it reports back.

pub mod job;
