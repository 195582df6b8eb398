use std::fmt;

use crate::ClientOptions;

/// Schema targeted when none is configured.
pub const DEFAULT_SCHEMA: &str = "public";

/// Connection identity for a [`Client`](crate::Client).
#[derive(Clone, Eq, PartialEq)]
pub struct ClientConfig {
    /// Project URL, e.g. `https://<ref>.supabase.co`.
    pub url: String,
    /// API key sent as `apikey` and as the bearer token.
    pub key: String,
    /// Schema selected through `Accept-Profile` / `Content-Profile`.
    pub schema: String,
    /// Options for the built-in HTTP transport.
    pub options: ClientOptions,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .field("schema", &self.schema)
            .field("options", &self.options)
            .finish()
    }
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
            schema: DEFAULT_SCHEMA.to_owned(),
            options: ClientOptions::default(),
        }
    }

    /// Sets the target schema.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = schema.into();
        self
    }

    /// Sets transport options.
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Reads the configuration from environment variables.
    ///
    /// Reads:
    /// - `SUPABASE_URL` — project URL
    /// - `SUPABASE_KEY` — API key
    /// - `SUPABASE_SCHEMA` — optional, defaults to `public`
    ///
    /// Returns [`PostgrestError::Config`](crate::PostgrestError::Config) if
    /// the URL or key is missing or empty.
    ///
    /// **Not available on `wasm32` targets.**
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> crate::Result<Self> {
        let url = required_env("SUPABASE_URL")?;
        let key = required_env("SUPABASE_KEY")?;
        let config = Self::new(url, key);
        match std::env::var("SUPABASE_SCHEMA") {
            Ok(schema) if !schema.trim().is_empty() => Ok(config.schema(schema.trim())),
            _ => Ok(config),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn required_env(name: &str) -> crate::Result<String> {
    let value = std::env::var(name).map_err(|_| {
        crate::PostgrestError::Config(format!("missing {name} environment variable"))
    })?;
    if value.trim().is_empty() {
        return Err(crate::PostgrestError::Config(format!(
            "{name} is set but empty"
        )));
    }
    Ok(value)
}
