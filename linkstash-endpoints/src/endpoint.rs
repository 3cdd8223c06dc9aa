//! Endpoint records and the catalog that holds them

use crate::spec::ParamSpec;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard HTTP verbs used by the bookmarking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Put,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Put => write!(f, "PUT"),
            Method::Post => write!(f, "POST"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// One API operation: an HTTP method and path, a help summary, an optional
/// positional path parameter, and the named parameters it accepts.
///
/// `params` preserves insertion order; consumers registering flags iterate it
/// in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    /// URL path segment (resource identifier appended when present).
    pub path: String,

    /// HTTP verb for this operation.
    pub method: Method,

    /// Human-readable summary shown in command help.
    pub help: String,

    /// Positional path parameter (e.g. a resource id embedded in the URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ParamSpec>,

    /// Named parameters, keyed by unique name, in registration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub params: IndexMap<String, ParamSpec>,
}

impl Endpoint {
    /// Create an endpoint with no parameters.
    pub fn new(method: Method, path: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            help: help.into(),
            resource: None,
            params: IndexMap::new(),
        }
    }

    /// Declare the positional path parameter.
    pub fn with_resource(mut self, resource: ParamSpec) -> Self {
        self.resource = Some(resource);
        self
    }

    /// Declare a named parameter. Parameter names are unique; redeclaring a
    /// name replaces the earlier spec in place.
    pub fn with_param(mut self, name: impl Into<String>, spec: ParamSpec) -> Self {
        self.params.insert(name.into(), spec);
        self
    }
}

/// Insertion-ordered mapping from subcommand name to endpoint record.
///
/// The catalog is read-only input for consumers: built once, iterated in
/// order, never mutated after generation begins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndpointCatalog {
    endpoints: IndexMap<String, Endpoint>,
}

impl EndpointCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an endpoint under its subcommand name. Returns the previous
    /// record if the name was already taken.
    pub fn insert(&mut self, name: impl Into<String>, endpoint: Endpoint) -> Option<Endpoint> {
        self.endpoints.insert(name.into(), endpoint)
    }

    /// Look up an endpoint by subcommand name.
    pub fn get(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.get(name)
    }

    /// Iterate endpoints in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Endpoint)> {
        self.endpoints.iter().map(|(name, ep)| (name.as_str(), ep))
    }

    /// Subcommand names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.endpoints.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
