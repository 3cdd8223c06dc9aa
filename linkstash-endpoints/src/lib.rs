//! Endpoint metadata model for the linkstash CLI
//!
//! `linkstash-endpoints` is a schema-only crate: it owns the declarative
//! description of a bookmarking service's REST surface (paths, methods,
//! per-parameter specs) and the built-in catalog of known endpoints.
//! It knows nothing about argument parsing or HTTP — consumers compile the
//! catalog into whatever interface they need.
//!
//! # Architecture
//!
//! - **Schema-only**: owns endpoint and parameter descriptions, not behavior
//! - **Order-preserving**: parameter maps and the catalog itself iterate in
//!   insertion order, which downstream consumers rely on
//! - **Open records**: a [`ParamSpec`] carries an options bag for annotation
//!   keys beyond the structural ones, forwarded verbatim to consumers

pub mod catalog;
pub mod endpoint;
pub mod spec;

pub use endpoint::{Endpoint, EndpointCatalog, Method};
pub use spec::{Cardinality, ParamSpec, ValueType};
