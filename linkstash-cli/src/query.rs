//! Conversion from parsed command-line matches to composed API requests
//!
//! The grammar compiled by [`crate::cli_builder::CliBuilder`] validates user
//! input; this module walks the validated matches back into the typed request
//! value handed to the transport layer. Extraction is driven by the same
//! parameter specs that drove registration, so types always line up.

use clap::parser::MatchesError;
use clap::ArgMatches;
use linkstash_endpoints::{Endpoint, Method, ParamSpec, ValueType};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// A fully composed API request, ready for the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiRequest {
    /// HTTP verb of the matched endpoint.
    pub method: Method,

    /// Endpoint path, with the resource identifier appended when supplied.
    pub path: String,

    /// Supplied parameters, keyed by parameter name. Parameters the user did
    /// not pass are omitted.
    pub query: Map<String, Value>,
}

/// Errors raised while extracting typed values from parsed matches.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("failed to read argument '{name}'")]
    Extraction {
        name: String,
        #[source]
        source: MatchesError,
    },
}

/// Converts validated [`ArgMatches`] back into request values.
pub struct QueryConverter;

impl QueryConverter {
    /// Compose the request for one endpoint from its parsed subcommand
    /// matches.
    ///
    /// # Arguments
    /// * `endpoint` - The metadata record the subcommand was generated from
    /// * `matches` - The subcommand's parsed matches
    ///
    /// # Errors
    /// Returns `ConversionError` when an argument cannot be read back — in
    /// practice only when `matches` was parsed by a grammar other than the
    /// one generated for `endpoint`.
    pub fn matches_to_request(
        endpoint: &Endpoint,
        matches: &ArgMatches,
    ) -> Result<ApiRequest, ConversionError> {
        let mut path = endpoint.path.clone();
        if let Some(spec) = &endpoint.resource {
            if let Some(value) = Self::extract(matches, "resource", spec)? {
                path = format!("{path}/{}", render_segment(&value));
            }
        }

        let mut query = Map::new();
        for (param, spec) in &endpoint.params {
            if let Some(value) = Self::extract(matches, param, spec)? {
                query.insert(param.clone(), value);
            }
        }

        Ok(ApiRequest {
            method: endpoint.method,
            path,
            query,
        })
    }

    /// Extract one parameter's value according to its spec.
    ///
    /// Returns `Ok(None)` for parameters the user did not supply and for
    /// unset presence flags.
    fn extract(
        matches: &ArgMatches,
        name: &str,
        spec: &ParamSpec,
    ) -> Result<Option<Value>, ConversionError> {
        let wrap = |source| ConversionError::Extraction {
            name: name.to_string(),
            source,
        };
        // declared cardinality always yields a list, even a fixed count of 1
        let many = spec.cardinality.is_some();

        match spec.value_type {
            Some(ValueType::Boolean) => {
                let set = matches
                    .try_get_one::<bool>(name)
                    .map_err(wrap)?
                    .copied()
                    .unwrap_or(false);
                Ok(set.then(|| Value::Bool(true)))
            }
            Some(ValueType::Integer) => {
                if many {
                    Ok(matches.try_get_many::<i64>(name).map_err(wrap)?.map(|values| {
                        Value::Array(values.map(|v| Value::Number((*v).into())).collect())
                    }))
                } else {
                    Ok(matches
                        .try_get_one::<i64>(name)
                        .map_err(wrap)?
                        .map(|v| Value::Number((*v).into())))
                }
            }
            _ => {
                if many {
                    Ok(matches.try_get_many::<String>(name).map_err(wrap)?.map(|values| {
                        Value::Array(values.map(|v| Value::String(v.clone())).collect())
                    }))
                } else {
                    Ok(matches
                        .try_get_one::<String>(name)
                        .map_err(wrap)?
                        .map(|v| Value::String(v.clone())))
                }
            }
        }
    }
}

/// Render a resource value as a path segment.
fn render_segment(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        other => other.to_string(),
    }
}
