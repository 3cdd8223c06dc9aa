//! Dynamic CLI builder
//!
//! This module provides the [`CliBuilder`] that generates clap commands from
//! the endpoint catalog, one subcommand per endpoint.
//!
//! # Architecture
//!
//! The endpoint catalog is the single source of truth: a new catalog entry
//! appears as a CLI subcommand without code changes here. Each entry's
//! parameter specs drive flag registration — help text, value coercion,
//! allowed values, and cardinality all become clap argument configuration.
//!
//! # Command structure
//!
//! ```text
//! lks
//! ├── get-info
//! ├── get-links        --offset --limit --searchterm --searchtags --visibility
//! ├── post-link        --url --title --description --tags --private
//! ├── put-link         <resource> --url --title --description --tags --private
//! ├── delete-link      <resource>
//! └── ...
//! ```
//!
//! Generation is a synchronous, in-memory transformation performed once at
//! startup, before any user input is parsed. A malformed catalog entry fails
//! generation; the error propagates unchanged to the caller.

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, Command};
use linkstash_endpoints::{Cardinality, Endpoint, EndpointCatalog, ParamSpec, ValueType};
use thiserror::Error;

/// Configuration errors raised while compiling endpoint metadata into a
/// command grammar.
///
/// These indicate a bug in the metadata table, not a runtime condition: they
/// are raised at startup and abort it.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("endpoint '{endpoint}': unknown annotation key '{key}' for parameter '{param}'")]
    UnknownAnnotation {
        endpoint: String,
        param: String,
        key: String,
    },

    #[error("endpoint '{endpoint}': parameter '{param}' combines choices with type {value_type}")]
    ChoicesTypeMismatch {
        endpoint: String,
        param: String,
        value_type: ValueType,
    },

    #[error("endpoint '{endpoint}': boolean parameter '{param}' {detail}")]
    BooleanSpec {
        endpoint: String,
        param: String,
        detail: &'static str,
    },

    #[error("endpoint '{endpoint}': annotation '{key}' for parameter '{param}' expects {expected}")]
    InvalidAnnotationValue {
        endpoint: String,
        param: String,
        key: String,
        expected: &'static str,
    },
}

/// Dynamic CLI builder that generates clap commands from an endpoint catalog.
pub struct CliBuilder<'a> {
    catalog: &'a EndpointCatalog,
}

impl<'a> CliBuilder<'a> {
    /// Create a builder over the given catalog.
    pub fn new(catalog: &'a EndpointCatalog) -> Self {
        Self { catalog }
    }

    /// Build the complete CLI: the root grammar plus one subcommand per
    /// catalog entry, in catalog order.
    ///
    /// The root carries no flags of its own besides help; invoking the binary
    /// without a subcommand displays usage.
    pub fn build_cli(&self) -> Result<Command, GenerationError> {
        let mut cli = Command::new("lks")
            .about("Command-line client for a linkstash bookmarking service")
            .arg_required_else_help(true);

        for (name, endpoint) in self.catalog.iter() {
            cli = cli.subcommand(Self::endpoint_command(name, endpoint)?);
        }

        Ok(cli)
    }

    /// Translate one endpoint metadata record into a configured sub-grammar.
    ///
    /// The returned command carries the endpoint's help text, a positional
    /// argument literally named `resource` when the record declares one, and
    /// one `--<name>` flag per entry in `params`, in insertion order. The
    /// record's `path` and `method` are not consumed here; they belong to
    /// request composition.
    ///
    /// clap places a single `-h`/`--help` flag with fixed wording on every
    /// grammar node, root and subcommand alike.
    pub fn endpoint_command(name: &str, endpoint: &Endpoint) -> Result<Command, GenerationError> {
        let mut cmd = Command::new(name.to_string()).about(endpoint.help.clone());

        if let Some(spec) = &endpoint.resource {
            cmd = cmd.arg(Self::apply_spec(
                Arg::new("resource"),
                spec,
                name,
                "resource",
                true,
            )?);
        }

        for (param, spec) in &endpoint.params {
            let arg = Arg::new(param.clone()).long(param.clone());
            cmd = cmd.arg(Self::apply_spec(arg, spec, name, param, false)?);
        }

        tracing::debug!(endpoint = name, "registered endpoint subcommand");
        Ok(cmd)
    }

    /// Forward a parameter spec's annotations onto a clap argument.
    ///
    /// Structural placement (positional vs. named) is decided by the caller;
    /// everything else on the spec is applied here. Unrecognized annotation
    /// keys are rejected rather than dropped.
    fn apply_spec(
        mut arg: Arg,
        spec: &ParamSpec,
        endpoint: &str,
        param: &str,
        positional: bool,
    ) -> Result<Arg, GenerationError> {
        if let Some(help) = &spec.help {
            arg = arg.help(help.clone());
        }

        if spec.value_type == Some(ValueType::Boolean) {
            let detail = if positional {
                Some("cannot be a positional resource")
            } else if spec.choices.is_some() {
                Some("cannot declare choices")
            } else if spec.cardinality.is_some() {
                Some("cannot declare a cardinality")
            } else {
                None
            };
            if let Some(detail) = detail {
                return Err(GenerationError::BooleanSpec {
                    endpoint: endpoint.to_string(),
                    param: param.to_string(),
                    detail,
                });
            }
            arg = arg.action(ArgAction::SetTrue);
        } else {
            match (&spec.choices, spec.value_type) {
                (Some(_), Some(ValueType::Integer)) => {
                    return Err(GenerationError::ChoicesTypeMismatch {
                        endpoint: endpoint.to_string(),
                        param: param.to_string(),
                        value_type: ValueType::Integer,
                    });
                }
                (Some(choices), _) => {
                    arg = arg.value_parser(PossibleValuesParser::new(choices.clone()));
                }
                (None, Some(ValueType::Integer)) => {
                    arg = arg.value_parser(value_parser!(i64));
                }
                (None, _) => {}
            }

            if let Some(cardinality) = spec.cardinality {
                arg = match cardinality {
                    Cardinality::ZeroOrMore => arg.num_args(0..),
                    Cardinality::OneOrMore => arg.num_args(1..),
                    Cardinality::Exactly(count) => arg.num_args(count),
                };
            }
        }

        let mut explicit_required = None;
        let mut has_default = false;

        for (key, value) in &spec.extra {
            match key.as_str() {
                "default" => {
                    let Some(text) = value.as_str() else {
                        return Err(GenerationError::InvalidAnnotationValue {
                            endpoint: endpoint.to_string(),
                            param: param.to_string(),
                            key: key.clone(),
                            expected: "a string value",
                        });
                    };
                    has_default = true;
                    arg = arg.default_value(text.to_string());
                }
                "required" => {
                    let Some(flag) = value.as_bool() else {
                        return Err(GenerationError::InvalidAnnotationValue {
                            endpoint: endpoint.to_string(),
                            param: param.to_string(),
                            key: key.clone(),
                            expected: "a boolean value",
                        });
                    };
                    explicit_required = Some(flag);
                }
                "value-name" => {
                    let Some(text) = value.as_str() else {
                        return Err(GenerationError::InvalidAnnotationValue {
                            endpoint: endpoint.to_string(),
                            param: param.to_string(),
                            key: key.clone(),
                            expected: "a string value",
                        });
                    };
                    arg = arg.value_name(text.to_string());
                }
                other => {
                    return Err(GenerationError::UnknownAnnotation {
                        endpoint: endpoint.to_string(),
                        param: param.to_string(),
                        key: other.to_string(),
                    });
                }
            }
        }

        // Path parameters are mandatory unless the record opts out or
        // supplies a default.
        match explicit_required {
            Some(flag) => arg = arg.required(flag),
            None if positional && !has_default => arg = arg.required(true),
            None => {}
        }

        Ok(arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkstash_endpoints::Method;
    use serde_json::json;

    fn find_arg<'c>(cmd: &'c Command, id: &str) -> &'c Arg {
        cmd.get_arguments()
            .find(|arg| arg.get_id().as_str() == id)
            .unwrap_or_else(|| panic!("argument '{id}' not registered"))
    }

    fn user_args(cmd: &Command) -> Vec<String> {
        cmd.get_arguments()
            .map(|arg| arg.get_id().to_string())
            .filter(|id| id != "help")
            .collect()
    }

    #[test]
    fn no_params_registers_only_the_help_flag() {
        let endpoint = Endpoint::new(Method::Put, "stuff", "Changes stuff");
        let mut cmd = CliBuilder::endpoint_command("put-stuff", &endpoint).unwrap();
        cmd.build();

        assert_eq!(cmd.get_name(), "put-stuff");
        assert!(user_args(&cmd).is_empty());
        // exactly one help flag on the subcommand itself
        let help = find_arg(&cmd, "help");
        assert_eq!(help.get_long(), Some("help"));
    }

    #[test]
    fn single_param_becomes_a_long_flag_with_its_spec() {
        let endpoint = Endpoint::new(Method::Get, "stuff", "Gets stuff")
            .with_param("param1", ParamSpec::new().with_help("First param"));
        let cmd = CliBuilder::endpoint_command("get-stuff", &endpoint).unwrap();

        let arg = find_arg(&cmd, "param1");
        assert_eq!(arg.get_long(), Some("param1"));
        assert!(!arg.is_positional());
        assert!(!arg.is_required_set());
        assert_eq!(arg.get_help().map(ToString::to_string).as_deref(), Some("First param"));
    }

    #[test]
    fn params_register_in_insertion_order() {
        let endpoint = Endpoint::new(Method::Get, "stuff", "Gets stuff")
            .with_param(
                "param1",
                ParamSpec::new().with_help("First param").with_type(ValueType::Integer),
            )
            .with_param(
                "param2",
                ParamSpec::new()
                    .with_choices(["a", "b", "c"])
                    .with_help("Second param")
                    .with_cardinality(Cardinality::OneOrMore),
            );
        let cmd = CliBuilder::endpoint_command("get-stuff", &endpoint).unwrap();

        assert_eq!(user_args(&cmd), ["param1", "param2"]);
    }

    #[test]
    fn integer_type_registers_a_coercing_parser() {
        let endpoint = Endpoint::new(Method::Get, "stuff", "Gets stuff").with_param(
            "param1",
            ParamSpec::new().with_help("First param").with_type(ValueType::Integer),
        );
        let cmd = CliBuilder::endpoint_command("get-stuff", &endpoint).unwrap();

        let matches = cmd
            .clone()
            .try_get_matches_from(["get-stuff", "--param1", "42"])
            .unwrap();
        assert_eq!(matches.get_one::<i64>("param1"), Some(&42));

        let err = cmd.try_get_matches_from(["get-stuff", "--param1", "forty-two"]);
        assert!(err.is_err());
    }

    #[test]
    fn choices_restrict_accepted_values() {
        let endpoint = Endpoint::new(Method::Get, "stuff", "Gets stuff").with_param(
            "param2",
            ParamSpec::new()
                .with_choices(["a", "b", "c"])
                .with_help("Second param")
                .with_cardinality(Cardinality::OneOrMore),
        );
        let cmd = CliBuilder::endpoint_command("get-stuff", &endpoint).unwrap();

        let arg = find_arg(&cmd, "param2");
        let allowed: Vec<String> = arg
            .get_possible_values()
            .iter()
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(allowed, ["a", "b", "c"]);

        let matches = cmd
            .clone()
            .try_get_matches_from(["get-stuff", "--param2", "a", "c"])
            .unwrap();
        let values: Vec<&String> = matches.get_many::<String>("param2").unwrap().collect();
        assert_eq!(values, ["a", "c"]);

        let err = cmd.try_get_matches_from(["get-stuff", "--param2", "d"]);
        assert!(err.is_err());
    }

    #[test]
    fn resource_registers_as_a_required_positional_before_flags() {
        let endpoint = Endpoint::new(Method::Get, "stuff", "Gets stuff")
            .with_resource(
                ParamSpec::new().with_help("API resource").with_type(ValueType::Integer),
            )
            .with_param("param1", ParamSpec::new().with_help("First param"));
        let cmd = CliBuilder::endpoint_command("get-stuff", &endpoint).unwrap();

        assert_eq!(user_args(&cmd), ["resource", "param1"]);

        let resource = find_arg(&cmd, "resource");
        assert!(resource.is_positional());
        assert!(resource.get_long().is_none());
        assert!(resource.is_required_set());
        assert_eq!(
            resource.get_help().map(ToString::to_string).as_deref(),
            Some("API resource")
        );

        let matches = cmd
            .clone()
            .try_get_matches_from(["get-stuff", "7"])
            .unwrap();
        assert_eq!(matches.get_one::<i64>("resource"), Some(&7));
    }

    #[test]
    fn resource_without_params_registers_no_long_flags() {
        let endpoint = Endpoint::new(Method::Get, "stuff", "Gets stuff").with_resource(
            ParamSpec::new().with_help("API resource").with_type(ValueType::Integer),
        );
        let mut cmd = CliBuilder::endpoint_command("get-stuff", &endpoint).unwrap();
        cmd.build();

        let long_flags: Vec<String> = cmd
            .get_arguments()
            .filter(|arg| arg.get_id().as_str() != "help")
            .filter_map(|arg| arg.get_long().map(str::to_string))
            .collect();
        assert!(long_flags.is_empty());
    }

    #[test]
    fn boolean_type_becomes_a_presence_flag() {
        let endpoint = Endpoint::new(Method::Post, "links", "Create a new bookmark").with_param(
            "private",
            ParamSpec::new().with_help("Keep the bookmark private").with_type(ValueType::Boolean),
        );
        let cmd = CliBuilder::endpoint_command("post-link", &endpoint).unwrap();

        let matches = cmd
            .clone()
            .try_get_matches_from(["post-link", "--private"])
            .unwrap();
        assert!(matches.get_flag("private"));

        let matches = cmd.try_get_matches_from(["post-link"]).unwrap();
        assert!(!matches.get_flag("private"));
    }

    #[test]
    fn unknown_annotation_key_fails_generation() {
        let endpoint = Endpoint::new(Method::Get, "stuff", "Gets stuff").with_param(
            "param1",
            ParamSpec::new().with_extra("frobnicate", json!(true)),
        );
        let err = CliBuilder::endpoint_command("get-stuff", &endpoint).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::UnknownAnnotation { ref key, .. } if key == "frobnicate"
        ));
    }

    #[test]
    fn choices_with_integer_type_fails_generation() {
        let endpoint = Endpoint::new(Method::Get, "stuff", "Gets stuff").with_param(
            "param1",
            ParamSpec::new().with_choices(["1", "2"]).with_type(ValueType::Integer),
        );
        let err = CliBuilder::endpoint_command("get-stuff", &endpoint).unwrap_err();
        assert!(matches!(err, GenerationError::ChoicesTypeMismatch { .. }));
    }

    #[test]
    fn boolean_with_cardinality_fails_generation() {
        let endpoint = Endpoint::new(Method::Get, "stuff", "Gets stuff").with_param(
            "param1",
            ParamSpec::new()
                .with_type(ValueType::Boolean)
                .with_cardinality(Cardinality::ZeroOrMore),
        );
        let err = CliBuilder::endpoint_command("get-stuff", &endpoint).unwrap_err();
        assert!(matches!(err, GenerationError::BooleanSpec { .. }));
    }

    #[test]
    fn default_and_value_name_annotations_forward() {
        let endpoint = Endpoint::new(Method::Get, "stuff", "Gets stuff").with_param(
            "limit",
            ParamSpec::new()
                .with_help("How many")
                .with_extra("default", json!("all"))
                .with_extra("value-name", json!("COUNT")),
        );
        let cmd = CliBuilder::endpoint_command("get-stuff", &endpoint).unwrap();

        let arg = find_arg(&cmd, "limit");
        let defaults: Vec<&str> = arg
            .get_default_values()
            .iter()
            .filter_map(|v| v.to_str())
            .collect();
        assert_eq!(defaults, ["all"]);
        assert_eq!(arg.get_value_names().map(|names| names[0].as_str()), Some("COUNT"));
    }

    #[test]
    fn required_annotation_overrides_positional_default() {
        let endpoint = Endpoint::new(Method::Get, "stuff", "Gets stuff").with_resource(
            ParamSpec::new()
                .with_help("API resource")
                .with_extra("required", json!(false)),
        );
        let cmd = CliBuilder::endpoint_command("get-stuff", &endpoint).unwrap();
        assert!(!find_arg(&cmd, "resource").is_required_set());
    }

    #[test]
    fn malformed_annotation_value_fails_generation() {
        let endpoint = Endpoint::new(Method::Get, "stuff", "Gets stuff").with_param(
            "param1",
            ParamSpec::new().with_extra("required", json!("yes")),
        );
        let err = CliBuilder::endpoint_command("get-stuff", &endpoint).unwrap_err();
        assert!(matches!(
            err,
            GenerationError::InvalidAnnotationValue { ref key, .. } if key == "required"
        ));
    }

    #[test]
    fn build_cli_registers_catalog_in_order() {
        let catalog = EndpointCatalog::builtin();
        let mut cli = CliBuilder::new(&catalog).build_cli().unwrap();
        cli.build();

        let subcommands: Vec<&str> = cli.get_subcommands().map(|c| c.get_name()).collect();
        let expected: Vec<&str> = catalog.names().collect();
        assert_eq!(subcommands, expected);
    }

    #[test]
    fn root_carries_only_the_help_flag() {
        let mut catalog = EndpointCatalog::new();
        catalog.insert("put-stuff", Endpoint::new(Method::Put, "stuff", "Changes stuff"));
        let mut cli = CliBuilder::new(&catalog).build_cli().unwrap();
        cli.build();

        let root_args: Vec<String> = cli.get_arguments().map(|a| a.get_id().to_string()).collect();
        assert_eq!(root_args, ["help"]);

        // one help flag on the root, one on the subcommand, nothing else
        let sub = cli.find_subcommand("put-stuff").unwrap();
        let sub_args: Vec<String> = sub.get_arguments().map(|a| a.get_id().to_string()).collect();
        assert_eq!(sub_args, ["help"]);
    }
}
