//! `postgrest-lite` is a small client for PostgREST-style HTTP data APIs
//! (Supabase REST included).
//!
//! [`Client::from`] starts an immutable [`Query`] for one table. Filters and
//! modifiers return new queries; one terminal call sends the request:
//! - [`Query::select`]
//! - [`Query::insert`]
//! - [`Query::update`]
//! - [`Query::delete`]
//!
//! Every terminal call resolves to an [`ApiResponse`] carrying either `data`
//! or an `error`; transport and HTTP failures are never returned as `Err`.
//!
//! ```no_run
//! use postgrest_lite::Client;
//!
//! # async fn run() -> postgrest_lite::Result<()> {
//! let client = Client::new("https://abc.supabase.co", "anon-key")?;
//! let response = client
//!     .from("users")
//!     .eq("is_active", true)
//!     .order("created_at", false)
//!     .limit(20)
//!     .select("id,email_id")
//!     .await;
//! let users = response.into_result()?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod options;
mod query;
mod response;
mod transport;
mod value;

pub use client::Client;
pub use config::{ClientConfig, DEFAULT_SCHEMA};
pub use error::PostgrestError;
pub use options::ClientOptions;
pub use query::Query;
pub use response::ApiResponse;
pub use transport::{
    Headers, HttpRequest, HttpResponse, HttpTransport, Method, Transport, TransportError,
};
pub use value::FilterValue;

pub type Result<T> = std::result::Result<T, PostgrestError>;
