/// Configures the built-in HTTP transport.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-request timeout in milliseconds. `None` waits for the server.
    pub timeout_ms: Option<u64>,
}

impl ClientOptions {
    /// Sets the per-request timeout.
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }
}
