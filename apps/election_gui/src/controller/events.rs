//! Events delivered from the host bridge to the UI thread.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// One raw JSON message from the host controller.
    Message(String),
    /// The host closed its end of the message stream.
    Disconnected,
}
