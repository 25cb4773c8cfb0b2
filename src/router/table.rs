//! Route table
//!
//! Ordered list of routes with first-match-wins dispatch.

use std::borrow::Cow;

use crate::error::Result;

use super::{Endpoint, Method, Route, DB_NAME, DOC_ID};

/// Ordered route table
///
/// Order is priority: the reserved `/_…` catch-all sits before the
/// `/{db}` routes, otherwise `_all_dbs`-style paths would never reach it.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// The server's route set
    pub fn standard() -> Result<Self> {
        let db = format!("/({})", DB_NAME);
        let doc = format!("/({})/({})", DB_NAME, DOC_ID);

        let mut table = Self::new();

        // Server
        table.add(Method::Get, "/", Endpoint::ServerInfo)?;
        table.add(Method::Get, "/_all_dbs", Endpoint::AllDbs)?;
        table.add(Method::Get, "/_(.*)", Endpoint::Reserved)?;

        // Databases
        table.add(Method::Get, &format!("{}/?", db), Endpoint::DbInfo)?;
        table.add(Method::Get, &format!("{}/_changes", db), Endpoint::DbChanges)?;
        table.add(Method::Head, &format!("{}/?", db), Endpoint::DbExists)?;
        table.add(Method::Put, "/_(.*)", Endpoint::Reserved)?;
        table.add(Method::Put, &format!("{}/?", db), Endpoint::CreateDb)?;
        table.add(Method::Delete, "/_(.*)", Endpoint::Reserved)?;
        table.add(Method::Delete, &format!("{}/?", db), Endpoint::DeleteDb)?;

        // Documents
        table.add(Method::Get, &doc, Endpoint::GetDocument)?;
        table.add(Method::Put, &doc, Endpoint::PutDocument)?;
        table.add(Method::Delete, &doc, Endpoint::DeleteDocument)?;

        Ok(table)
    }

    /// Append a route (lowest priority so far)
    pub fn add(&mut self, method: Method, pattern: &str, endpoint: Endpoint) -> Result<()> {
        self.routes.push(Route::new(method, pattern, endpoint)?);
        Ok(())
    }

    /// Resolve a request to its endpoint and captured path segments
    ///
    /// Matching runs on the raw path so an encoded `%2F` stays inside its
    /// segment; captures are then percent-decoded. Returns
    /// `(Endpoint::Unhandled, [])` when no route matches, including for
    /// methods the table does not know.
    pub fn dispatch(&self, method: &str, path: &str) -> (Endpoint, Vec<String>) {
        let Some(method) = Method::from_name(method) else {
            return (Endpoint::Unhandled, Vec::new());
        };

        self.routes
            .iter()
            .find_map(|route| route.matches(method, path).map(|args| (route.endpoint, args)))
            .map(|(endpoint, args)| (endpoint, args.into_iter().map(decode_segment).collect()))
            .unwrap_or((Endpoint::Unhandled, Vec::new()))
    }

    /// Routes in priority order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Percent-decode one captured segment
///
/// Stray `%` sequences pass through untouched; a segment that decodes to
/// invalid UTF-8 is kept raw.
fn decode_segment(raw: String) -> String {
    match urlencoding::decode(&raw) {
        Ok(Cow::Owned(decoded)) => decoded,
        Ok(Cow::Borrowed(_)) | Err(_) => raw,
    }
}
