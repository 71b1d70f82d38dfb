//! Host bridge: inbound message intake and outbound transport selection.

pub mod runtime;
pub mod stdin;
