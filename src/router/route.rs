//! Route definitions
//!
//! A route binds one HTTP method and one path pattern to an endpoint.

use regex::Regex;

use crate::error::Result;

/// Request methods the route table understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Head,
    Put,
    Post,
    Delete,
}

impl Method {
    /// Parse an HTTP method name (case-sensitive, as on the wire)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "GET" => Some(Method::Get),
            "HEAD" => Some(Method::Head),
            "PUT" => Some(Method::Put),
            "POST" => Some(Method::Post),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Put => "PUT",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// The handler a route resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /`
    ServerInfo,

    /// `GET /_all_dbs`
    AllDbs,

    /// Any other `/_…` path; names starting with `_` are reserved
    Reserved,

    /// `GET /{db}`
    DbInfo,

    /// `HEAD /{db}`
    DbExists,

    /// `PUT /{db}`
    CreateDb,

    /// `DELETE /{db}`
    DeleteDb,

    /// `GET /{db}/_changes` (not supported)
    DbChanges,

    /// `PUT /{db}/{docid}`
    PutDocument,

    /// `GET /{db}/{docid}`
    GetDocument,

    /// `DELETE /{db}/{docid}`
    DeleteDocument,

    /// Nothing matched
    Unhandled,
}

/// One entry of the route table
#[derive(Debug, Clone)]
pub struct Route {
    /// Method this route answers
    pub method: Method,

    /// Path pattern, anchored to the whole path
    pub pattern: Regex,

    /// Handler bound to the route
    pub endpoint: Endpoint,
}

impl Route {
    /// Compile a route; `pattern` must match the entire request path
    pub fn new(method: Method, pattern: &str, endpoint: Endpoint) -> Result<Self> {
        let pattern = Regex::new(&format!("^(?:{})$", pattern))?;
        Ok(Self {
            method,
            pattern,
            endpoint,
        })
    }

    /// Captured path segments if the route accepts `method` and `path`
    pub fn matches(&self, method: Method, path: &str) -> Option<Vec<String>> {
        if self.method != method {
            return None;
        }

        let captures = self.pattern.captures(path)?;
        Some(
            captures
                .iter()
                .skip(1)
                .map(|group| group.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }
}
