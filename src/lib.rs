//! Swagger From Service - Swagger 1.2 documentation for REST service descriptors.
//!
//! This library turns the description of a REST service (its route template, the HTTP
//! operations it answers and the input fields it accepts) into a Swagger 1.2 API
//! declaration, and a whole API into a Swagger 1.2 resource listing.
//!
//! # Architecture
//!
//! 1. [`descriptor`] - Service and API descriptors, loadable from JSON or YAML
//! 2. [`route`] - Rewrites `/things[/:id]` route templates into `/things/{id}` paths
//! 3. [`model_generator`] - Folds service fields into named models
//! 4. [`declaration_builder`] - Builds the API declaration of one service
//! 5. [`listing_builder`] - Builds the resource listing of an API
//! 6. [`serializer`] - Serializes documents to JSON or YAML
//!
//! # Example Usage
//!
//! ```
//! use swagger_from_service::{
//!     declaration_builder::DeclarationBuilder,
//!     descriptor::{Field, HttpMethod, Operation, ServiceDescriptor},
//!     serializer::serialize_json,
//! };
//!
//! let mut service = ServiceDescriptor::new("Widget", "/widgets[/:id]", "1");
//! service.route_identifier_name = "id".to_string();
//! service.operations.push(Operation::new(HttpMethod::Post, "Create a widget"));
//! service.entity_operations.push(Operation::new(HttpMethod::Get, "Fetch a widget"));
//! service.fields.push(Field::new("name", "Widget name", true));
//!
//! let doc = DeclarationBuilder::new("http://localhost/api").build(&service).unwrap();
//! assert_eq!(doc.apis[0].path, "/widgets");
//! assert_eq!(doc.apis[1].path, "/widgets/{id}");
//!
//! let json = serialize_json(&doc).unwrap();
//! println!("{}", json);
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod declaration_builder;
pub mod descriptor;
pub mod error;
pub mod listing_builder;
pub mod model_generator;
pub mod route;
pub mod serializer;
