//! Immutable PostgREST query builder.
//!
//! Every filter or modifier takes `&self` and returns a new [`Query`], so a
//! partially built query can be kept and branched into several requests.
//! Terminal operations (`select`, `insert`, `update`, `delete`) consume the
//! query, send exactly one request and return an [`ApiResponse`].

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::{
    response::normalize,
    transport::{Headers, HttpRequest, HttpTransport, Method, Transport},
    ApiResponse, FilterValue, PostgrestError,
};

const ACCEPT: &str = "Accept";
const PREFER: &str = "Prefer";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Clause prefixes that shape the result set without selecting rows.
const MODIFIER_PREFIXES: [&str; 3] = ["order=", "limit=", "offset="];

/// Request builder bound to one table.
pub struct Query<T = HttpTransport> {
    transport: Arc<T>,
    table_url: Arc<str>,
    clauses: Vec<String>,
    headers: Headers,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            table_url: Arc::clone(&self.table_url),
            clauses: self.clauses.clone(),
            headers: self.headers.clone(),
        }
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("table_url", &self.table_url)
            .field("clauses", &self.clauses)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Query<T> {
    pub(crate) fn new(transport: Arc<T>, table_url: String, headers: Headers) -> Self {
        Self {
            transport,
            table_url: table_url.into(),
            clauses: Vec::new(),
            headers,
        }
    }

    /// Resource URL of the table, without query parameters.
    pub fn table_url(&self) -> &str {
        &self.table_url
    }

    /// Rendered clauses in the order they were added.
    pub fn clauses(&self) -> &[String] {
        &self.clauses
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// URL with the accumulated clauses, as used by `update` and `delete`.
    pub fn url(&self) -> String {
        render_url(&self.table_url, &self.clauses)
    }

    /// Whether any clause restricts which rows are matched.
    pub fn has_filters(&self) -> bool {
        self.clauses.iter().any(|clause| {
            !MODIFIER_PREFIXES
                .iter()
                .any(|prefix| clause.starts_with(prefix))
        })
    }

    #[cfg(feature = "tracing")]
    fn warn_if_unfiltered(&self, operation: &str) {
        if !self.has_filters() {
            tracing::warn!(
                "unfiltered {} on {} matches every row",
                operation,
                self.table_url
            );
        }
    }

    fn with_clause(&self, clause: String) -> Self {
        let mut next = self.clone();
        next.clauses.push(clause);
        next
    }

    fn with_header(&self, name: &str, value: &str) -> Self {
        let mut next = self.clone();
        next.headers.insert(name.to_owned(), value.to_owned());
        next
    }

    /// Adds `column=<operator>.<value>` for any PostgREST operator.
    ///
    /// The value is percent-encoded; column and operator are used verbatim.
    pub fn filter(&self, column: &str, operator: &str, value: impl Into<FilterValue>) -> Self {
        self.with_clause(format!("{column}={operator}.{}", value.into().encoded()))
    }

    /// `column = value`
    pub fn eq(&self, column: &str, value: impl Into<FilterValue>) -> Self {
        self.filter(column, "eq", value)
    }

    /// `column <> value`
    pub fn neq(&self, column: &str, value: impl Into<FilterValue>) -> Self {
        self.filter(column, "neq", value)
    }

    /// `column > value`
    pub fn gt(&self, column: &str, value: impl Into<FilterValue>) -> Self {
        self.filter(column, "gt", value)
    }

    /// `column >= value`
    pub fn gte(&self, column: &str, value: impl Into<FilterValue>) -> Self {
        self.filter(column, "gte", value)
    }

    /// `column < value`
    pub fn lt(&self, column: &str, value: impl Into<FilterValue>) -> Self {
        self.filter(column, "lt", value)
    }

    /// `column <= value`
    pub fn lte(&self, column: &str, value: impl Into<FilterValue>) -> Self {
        self.filter(column, "lte", value)
    }

    /// `column LIKE pattern`. Wildcards (`%`, `*`) are up to the caller.
    pub fn like(&self, column: &str, pattern: impl Into<FilterValue>) -> Self {
        self.filter(column, "like", pattern)
    }

    /// `column ILIKE pattern`. Wildcards (`%`, `*`) are up to the caller.
    pub fn ilike(&self, column: &str, pattern: impl Into<FilterValue>) -> Self {
        self.filter(column, "ilike", pattern)
    }

    /// `column IS value`, for `null`, `true` and `false`.
    pub fn is(&self, column: &str, value: impl Into<FilterValue>) -> Self {
        self.filter(column, "is", value)
    }

    /// `column IN (v1, v2, ...)`, rendered as `column=in.(v1,v2)`.
    pub fn in_<I, V>(&self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        let values = values
            .into_iter()
            .map(|value| value.into().encoded())
            .collect::<Vec<_>>()
            .join(",");
        self.with_clause(format!("{column}=in.({values})"))
    }

    /// Adds a raw `or=(<expression>)` clause, e.g. `"status.eq.open,priority.gt.3"`.
    ///
    /// The expression is neither validated nor encoded; a malformed one is
    /// rejected by the server.
    pub fn or(&self, expression: &str) -> Self {
        self.with_clause(format!("or=({expression})"))
    }

    /// Orders by one column.
    pub fn order(&self, column: &str, ascending: bool) -> Self {
        self.with_clause(order_clause(column, ascending))
    }

    /// Orders by several columns, one `order=` clause per entry in iteration order.
    pub fn order_by<I, K>(&self, columns: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: AsRef<str>,
    {
        let mut next = self.clone();
        next.clauses.extend(
            columns
                .into_iter()
                .map(|(column, ascending)| order_clause(column.as_ref(), ascending)),
        );
        next
    }

    pub fn limit(&self, count: usize) -> Self {
        self.with_clause(format!("limit={count}"))
    }

    pub fn offset(&self, count: usize) -> Self {
        self.with_clause(format!("offset={count}"))
    }

    /// Requests a single JSON object instead of an array.
    ///
    /// Only the `Accept` header changes; the server answers with an error
    /// status when the filters do not match exactly one row.
    pub fn single(&self) -> Self {
        self.with_header(ACCEPT, SINGLE_OBJECT)
    }

    /// Sends `GET <table>?select=<columns>&<clauses>`.
    ///
    /// `select=` is always the first query parameter. Pass `"*"` for all
    /// columns.
    pub async fn select(self, columns: &str) -> ApiResponse {
        let mut clauses = Vec::with_capacity(self.clauses.len() + 1);
        clauses.push(format!("select={}", urlencoding::encode(columns)));
        clauses.extend(self.clauses);

        let request = HttpRequest {
            method: Method::Get,
            url: render_url(&self.table_url, &clauses),
            headers: self.headers,
            body: None,
        };
        dispatch(self.transport.as_ref(), request).await
    }

    /// Sends `POST <table>` with `row` as JSON and returns the created rows.
    ///
    /// Filter clauses are ignored; `row` may be a single object or an array.
    pub async fn insert<R: Serialize + ?Sized>(self, row: &R) -> ApiResponse {
        let body = match encode_row(row) {
            Ok(body) => body,
            Err(err) => return ApiResponse::error(err),
        };

        let mut headers = self.headers;
        headers.insert(PREFER.to_owned(), RETURN_REPRESENTATION.to_owned());
        let request = HttpRequest {
            method: Method::Post,
            url: self.table_url.to_string(),
            headers,
            body: Some(body),
        };
        dispatch(self.transport.as_ref(), request).await
    }

    /// Sends `PATCH <table>?<clauses>` with `row` as JSON and returns the
    /// updated rows.
    ///
    /// Without a filter clause every row of the table is updated.
    pub async fn update<R: Serialize + ?Sized>(self, row: &R) -> ApiResponse {
        let body = match encode_row(row) {
            Ok(body) => body,
            Err(err) => return ApiResponse::error(err),
        };
        #[cfg(feature = "tracing")]
        self.warn_if_unfiltered("update");

        let url = self.url();
        let mut headers = self.headers;
        headers.insert(PREFER.to_owned(), RETURN_REPRESENTATION.to_owned());
        let request = HttpRequest {
            method: Method::Patch,
            url,
            headers,
            body: Some(body),
        };
        dispatch(self.transport.as_ref(), request).await
    }

    /// Sends `DELETE <table>?<clauses>`.
    ///
    /// Without a filter clause every row of the table is deleted.
    pub async fn delete(self) -> ApiResponse {
        #[cfg(feature = "tracing")]
        self.warn_if_unfiltered("delete");

        let request = HttpRequest {
            method: Method::Delete,
            url: self.url(),
            headers: self.headers,
            body: None,
        };
        dispatch(self.transport.as_ref(), request).await
    }
}

fn order_clause(column: &str, ascending: bool) -> String {
    let direction = if ascending { "asc" } else { "desc" };
    format!("order={column}.{direction}")
}

fn render_url(table_url: &str, clauses: &[String]) -> String {
    if clauses.is_empty() {
        table_url.to_owned()
    } else {
        format!("{table_url}?{}", clauses.join("&"))
    }
}

fn encode_row<R: Serialize + ?Sized>(row: &R) -> Result<String, PostgrestError> {
    serde_json::to_string(row)
        .map_err(|err| PostgrestError::Encode(format!("row is not valid JSON: {err}")))
}

async fn dispatch<T: Transport>(transport: &T, request: HttpRequest) -> ApiResponse {
    #[cfg(feature = "tracing")]
    tracing::debug!("sending {} {}", request.method, request.url);

    let outcome = transport.send(request).await;

    #[cfg(feature = "tracing")]
    {
        if let Err(err) = &outcome {
            tracing::warn!("PostgREST request failed: {}", err);
        }
    }

    normalize(outcome)
}
