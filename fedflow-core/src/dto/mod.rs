//! Data transfer objects for the flow-client protocol
//!
//! The flow client speaks JSON over stdout; these types describe that wire
//! shape and the validated results the client façade hands back to callers.

pub mod response;
