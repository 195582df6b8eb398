use std::fmt;
use std::sync::Arc;

use crate::{
    config::DEFAULT_SCHEMA,
    query::Query,
    transport::{Headers, HttpTransport, Transport},
    ClientConfig, PostgrestError, Result,
};

/// Path segment of the versioned REST endpoint.
const REST_PATH: &str = "/rest/v1";

/// Entry point for building table queries.
///
/// Holds the connection identity (endpoint, key, schema) and the transport.
/// All of it is read-only after construction; [`Client::from`] hands out
/// independent [`Query`] builders.
pub struct Client<T = HttpTransport> {
    transport: Arc<T>,
    base_url: Arc<str>,
    api_key: Arc<str>,
    schema: Arc<str>,
}

impl<T> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            base_url: Arc::clone(&self.base_url),
            api_key: Arc::clone(&self.api_key),
            schema: Arc::clone(&self.schema),
        }
    }
}

impl<T> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("schema", &self.schema)
            .finish()
    }
}

impl Client<HttpTransport> {
    /// Creates a client for the `public` schema using the built-in transport.
    ///
    /// `url` is the project URL; `/rest/v1` is appended automatically.
    /// Fails with [`PostgrestError::Config`] if `url` or `key` is empty.
    pub fn new(url: impl AsRef<str>, key: impl AsRef<str>) -> Result<Self> {
        Self::with_transport(url, key, HttpTransport::new())
    }

    /// Creates a client from a [`ClientConfig`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use postgrest_lite::{Client, ClientConfig};
    ///
    /// let client = Client::from_config(ClientConfig::from_env()?)?;
    /// # Ok::<(), postgrest_lite::PostgrestError>(())
    /// ```
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new().with_options(config.options);
        let client = Self::with_transport(config.url, config.key, transport)?;
        Ok(client.with_schema(config.schema))
    }
}

impl<T: Transport> Client<T> {
    /// Creates a client that sends requests through a custom transport.
    pub fn with_transport(
        url: impl AsRef<str>,
        key: impl AsRef<str>,
        transport: T,
    ) -> Result<Self> {
        let base_url = normalize_base_url(url.as_ref())
            .ok_or_else(|| PostgrestError::Config("PostgREST URL must be provided".to_owned()))?;
        let key = key.as_ref().trim();
        if key.is_empty() {
            return Err(PostgrestError::Config("API key must be provided".to_owned()));
        }

        Ok(Self {
            transport: Arc::new(transport),
            base_url: base_url.into(),
            api_key: key.into(),
            schema: DEFAULT_SCHEMA.into(),
        })
    }

    /// Returns a client targeting another schema, sharing the transport.
    ///
    /// A blank name selects [`DEFAULT_SCHEMA`].
    pub fn with_schema(&self, schema: impl AsRef<str>) -> Self {
        let schema = match schema.as_ref().trim() {
            "" => DEFAULT_SCHEMA,
            name => name,
        };
        Self {
            schema: schema.into(),
            ..self.clone()
        }
    }

    /// REST endpoint root, e.g. `https://<ref>.supabase.co/rest/v1`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Starts a query against `table`.
    ///
    /// The table name is not validated; an unknown table is reported by the
    /// server when a terminal operation runs.
    pub fn from(&self, table: &str) -> Query<T> {
        Query::new(
            Arc::clone(&self.transport),
            format!("{}/{}", self.base_url, table),
            default_headers(&self.api_key, &self.schema),
        )
    }
}

fn normalize_base_url(url: &str) -> Option<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.ends_with(REST_PATH) {
        Some(trimmed.to_owned())
    } else {
        Some(format!("{trimmed}{REST_PATH}"))
    }
}

fn default_headers(api_key: &str, schema: &str) -> Headers {
    Headers::from([
        ("apikey".to_owned(), api_key.to_owned()),
        ("Authorization".to_owned(), format!("Bearer {api_key}")),
        ("Content-Type".to_owned(), "application/json".to_owned()),
        ("Accept-Profile".to_owned(), schema.to_owned()),
        ("Content-Profile".to_owned(), schema.to_owned()),
    ])
}

#[cfg(test)]
mod tests {
    use super::{normalize_base_url, Client};
    use crate::{ClientConfig, PostgrestError};

    #[test]
    fn normalize_base_url_appends_rest_path() {
        assert_eq!(
            normalize_base_url("https://abc.supabase.co/").as_deref(),
            Some("https://abc.supabase.co/rest/v1")
        );
        assert_eq!(
            normalize_base_url("https://abc.supabase.co").as_deref(),
            Some("https://abc.supabase.co/rest/v1")
        );
    }

    #[test]
    fn normalize_base_url_keeps_existing_rest_path() {
        assert_eq!(
            normalize_base_url("https://abc.supabase.co/rest/v1/").as_deref(),
            Some("https://abc.supabase.co/rest/v1")
        );
    }

    #[test]
    fn missing_url_is_config_error() {
        let err = Client::new("  ", "key").expect_err("must fail");
        assert!(matches!(err, PostgrestError::Config(_)));
    }

    #[test]
    fn missing_key_is_config_error() {
        let err = Client::new("https://abc.supabase.co", "").expect_err("must fail");
        assert!(matches!(err, PostgrestError::Config(_)));
    }

    #[test]
    fn from_builds_table_url_and_default_headers() {
        let client = Client::new("https://abc.supabase.co/", "anon-key").expect("valid client");
        let query = client.from("users");

        assert_eq!(query.table_url(), "https://abc.supabase.co/rest/v1/users");
        assert!(query.clauses().is_empty());

        let headers = query.headers();
        assert_eq!(headers["apikey"], "anon-key");
        assert_eq!(headers["Authorization"], "Bearer anon-key");
        assert_eq!(headers["Content-Type"], "application/json");
        assert_eq!(headers["Accept-Profile"], "public");
        assert_eq!(headers["Content-Profile"], "public");
        assert!(!headers.contains_key("Accept"));
    }

    #[test]
    fn with_schema_switches_profile_headers_only() {
        let public = Client::new("https://abc.supabase.co", "anon-key").expect("valid client");
        let reporting = public.with_schema("reporting");

        assert_eq!(public.schema(), "public");
        assert_eq!(reporting.schema(), "reporting");
        assert_eq!(reporting.base_url(), public.base_url());

        let headers = reporting.from("voucher").headers().clone();
        assert_eq!(headers["Accept-Profile"], "reporting");
        assert_eq!(headers["Content-Profile"], "reporting");
    }

    #[test]
    fn blank_schema_falls_back_to_public() {
        let client = Client::new("https://abc.supabase.co", "anon-key").expect("valid client");
        let blank = client.with_schema("reporting").with_schema("  ");

        assert_eq!(blank.schema(), "public");
        let headers = blank.from("users").headers().clone();
        assert_eq!(headers["Accept-Profile"], "public");
        assert_eq!(headers["Content-Profile"], "public");

        let from_config = Client::from_config(
            ClientConfig::new("https://abc.supabase.co", "anon-key").schema(""),
        )
        .expect("valid client");
        assert_eq!(from_config.schema(), "public");
    }

    #[test]
    fn from_config_applies_schema() {
        let client = Client::from_config(
            ClientConfig::new("https://abc.supabase.co", "anon-key").schema("reporting"),
        )
        .expect("valid client");
        assert_eq!(client.schema(), "reporting");
    }

    #[test]
    fn debug_redacts_api_key() {
        let client = Client::new("https://abc.supabase.co", "secret-key").expect("valid client");
        let debug = format!("{client:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret-key"));
    }
}
