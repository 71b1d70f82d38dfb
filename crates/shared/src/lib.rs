//! Wire types shared between the election engine, its rendering surfaces and tooling.

pub mod domain;
pub mod error;
pub mod protocol;
