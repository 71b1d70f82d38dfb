//! Client-side synchronization engine for the election UI.
//!
//! Host messages flow into [`ElectionUi`], which keeps the single [`ViewModel`],
//! reconciles the three candidate slots and the detail modal, and writes render
//! instructions to a [`RenderSurface`]. User actions go back out through a
//! fire-and-forget [`HostTransport`].

pub mod assets;
pub mod config;
pub mod dispatcher;
pub mod engine;
pub mod error;
mod inbound;
pub mod modal;
pub mod slots;
pub mod standalone;
pub mod surface;
pub mod transport;
pub mod view_model;
pub mod visibility;

pub use config::{load_settings, load_settings_from, Settings};
pub use engine::{ElectionUi, UserAction};
pub use error::TransportError;
pub use standalone::RuntimeMode;
pub use surface::{RenderInstruction, RenderSurface, RetainedSurface, SurfaceTarget};
pub use transport::{
    spawn_http_worker, HostEndpoint, HostTransport, NullTransport, QueuedTransport,
    RecordingTransport,
};
pub use view_model::ViewModel;
