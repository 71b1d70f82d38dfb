//! Controller layer: host events and input mapping into engine actions.

pub mod events;
pub mod input;
