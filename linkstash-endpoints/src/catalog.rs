//! Built-in catalog of bookmarking-service endpoints
//!
//! The static metadata table the CLI bootstrap iterates. One entry per API
//! operation: instance info, bookmark CRUD, and tag management.

use crate::endpoint::{Endpoint, EndpointCatalog, Method};
use crate::spec::{Cardinality, ParamSpec, ValueType};

impl EndpointCatalog {
    /// The embedded table of known service endpoints, in display order.
    pub fn builtin() -> Self {
        let mut catalog = EndpointCatalog::new();

        catalog.insert(
            "get-info",
            Endpoint::new(Method::Get, "info", "Get information about this instance"),
        );

        catalog.insert(
            "get-links",
            Endpoint::new(Method::Get, "links", "Get the list of bookmarks")
                .with_param(
                    "offset",
                    ParamSpec::new()
                        .with_help("Offset from which to start listing bookmarks")
                        .with_type(ValueType::Integer),
                )
                .with_param(
                    "limit",
                    ParamSpec::new().with_help("Number of bookmarks to retrieve, or 'all'"),
                )
                .with_param(
                    "searchterm",
                    ParamSpec::new()
                        .with_help("Search terms across all bookmark fields")
                        .with_cardinality(Cardinality::OneOrMore),
                )
                .with_param(
                    "searchtags",
                    ParamSpec::new()
                        .with_help("Tags the bookmarks must carry")
                        .with_cardinality(Cardinality::OneOrMore),
                )
                .with_param(
                    "visibility",
                    ParamSpec::new()
                        .with_help("Filter bookmarks by visibility")
                        .with_choices(["all", "private", "public"]),
                ),
        );

        catalog.insert(
            "post-link",
            Endpoint::new(Method::Post, "links", "Create a new bookmark")
                .with_param("url", ParamSpec::new().with_help("URL of the page to bookmark"))
                .with_param("title", ParamSpec::new().with_help("Title of the bookmark"))
                .with_param(
                    "description",
                    ParamSpec::new().with_help("Descriptive text for the bookmark"),
                )
                .with_param(
                    "tags",
                    ParamSpec::new()
                        .with_help("Tags attached to the bookmark")
                        .with_cardinality(Cardinality::OneOrMore),
                )
                .with_param(
                    "private",
                    ParamSpec::new()
                        .with_help("Keep the bookmark private")
                        .with_type(ValueType::Boolean),
                ),
        );

        catalog.insert(
            "put-link",
            Endpoint::new(Method::Put, "links", "Update an existing bookmark")
                .with_resource(
                    ParamSpec::new()
                        .with_help("Identifier of the bookmark to update")
                        .with_type(ValueType::Integer),
                )
                .with_param("url", ParamSpec::new().with_help("URL of the page to bookmark"))
                .with_param("title", ParamSpec::new().with_help("Title of the bookmark"))
                .with_param(
                    "description",
                    ParamSpec::new().with_help("Descriptive text for the bookmark"),
                )
                .with_param(
                    "tags",
                    ParamSpec::new()
                        .with_help("Tags attached to the bookmark")
                        .with_cardinality(Cardinality::OneOrMore),
                )
                .with_param(
                    "private",
                    ParamSpec::new()
                        .with_help("Keep the bookmark private")
                        .with_type(ValueType::Boolean),
                ),
        );

        catalog.insert(
            "delete-link",
            Endpoint::new(Method::Delete, "links", "Delete a bookmark").with_resource(
                ParamSpec::new()
                    .with_help("Identifier of the bookmark to delete")
                    .with_type(ValueType::Integer),
            ),
        );

        catalog.insert(
            "get-tags",
            Endpoint::new(Method::Get, "tags", "Get the list of tags")
                .with_param(
                    "offset",
                    ParamSpec::new()
                        .with_help("Offset from which to start listing tags")
                        .with_type(ValueType::Integer),
                )
                .with_param(
                    "limit",
                    ParamSpec::new().with_help("Number of tags to retrieve, or 'all'"),
                ),
        );

        catalog.insert(
            "get-tag",
            Endpoint::new(Method::Get, "tags", "Get a single tag")
                .with_resource(ParamSpec::new().with_help("Name of the tag")),
        );

        catalog.insert(
            "put-tag",
            Endpoint::new(Method::Put, "tags", "Rename a tag")
                .with_resource(ParamSpec::new().with_help("Tag to rename"))
                .with_param("name", ParamSpec::new().with_help("New name for the tag")),
        );

        catalog.insert(
            "delete-tag",
            Endpoint::new(Method::Delete, "tags", "Delete a tag")
                .with_resource(ParamSpec::new().with_help("Tag to delete")),
        );

        catalog
    }
}
