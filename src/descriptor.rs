//! REST service descriptors consumed by the document builders.
//!
//! A descriptor is the in-memory description of one REST service: its route template,
//! the operations it answers at collection and entity level, and the input fields it
//! accepts. Descriptors are read-only to the builders; they can be constructed directly
//! or loaded from JSON/YAML files through [`ApiDescriptor::from_file`].
//!
//! # Example
//!
//! ```
//! use swagger_from_service::descriptor::{Field, HttpMethod, Operation, ServiceDescriptor};
//!
//! let mut service = ServiceDescriptor::new("Widget", "/widgets[/:id]", "1");
//! service.route_identifier_name = "id".to_string();
//! service.operations.push(Operation::new(HttpMethod::Get, "List widgets"));
//! service.fields.push(Field::new("name", "Widget name", true));
//! assert_eq!(service.route_identifier(), Some("id"));
//! ```

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Key under which the default input filter's fields are nested.
pub const INPUT_FILTER_KEY: &str = "input_filter";

/// HTTP methods a service operation can answer.
///
/// Upper-case standard names map to their variants; any other name, including a
/// lower-case spelling of a standard one, is kept verbatim in [`HttpMethod::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    #[serde(untagged)]
    Other(String),
}

impl HttpMethod {
    /// Wire name of the method
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Other(name) => name,
        }
    }

    /// Whether requests with this method send the entity as a body.
    ///
    /// Only the upper-case `POST`, `PUT` and `PATCH` qualify.
    pub fn carries_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version information of the API a service belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiInfo {
    #[serde(default)]
    pub version: String,
}

/// A single HTTP operation exposed by a service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub http_method: HttpMethod,
    #[serde(default)]
    pub description: String,
    /// Documented status codes and their messages, in declaration order
    #[serde(default)]
    pub response_status_codes: IndexMap<u16, String>,
}

impl Operation {
    pub fn new(http_method: HttpMethod, description: impl Into<String>) -> Self {
        Self {
            http_method,
            description: description.into(),
            response_status_codes: IndexMap::new(),
        }
    }

    /// Add a documented response status code
    pub fn with_status(mut self, code: u16, message: impl Into<String>) -> Self {
        self.response_status_codes.insert(code, message.into());
        self
    }
}

/// An input field accepted by a service.
///
/// `name` may carry a model prefix (`"address/street"`), in which case the field belongs
/// to the nested model named by the prefix. `field_type` and `allowed_values` are optional
/// capabilities: when absent the field is documented as a plain string without an enum.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(rename = "type", default)]
    pub field_type: Option<String>,
    #[serde(rename = "enum", default)]
    pub allowed_values: Option<Vec<String>>,
}

impl Field {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            field_type: None,
            allowed_values: None,
        }
    }

    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Declared type, or `"string"` when the field declares none
    pub fn property_type(&self) -> &str {
        self.field_type.as_deref().unwrap_or("string")
    }

    /// Enum values, only when the field declares a non-empty set
    pub fn enum_values(&self) -> Option<&[String]> {
        self.allowed_values
            .as_deref()
            .filter(|values| !values.is_empty())
    }
}

/// The fields of a service, either as a flat list or grouped by input filter name.
///
/// When a keyed set names an [`INPUT_FILTER_KEY`] group, that group is the only one read;
/// its siblings may hold anything (validator settings, filter specs) and are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawFieldSet")]
pub enum FieldSet {
    List(Vec<Field>),
    Keyed(IndexMap<String, Vec<Field>>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFieldSet {
    List(Vec<Field>),
    Keyed(IndexMap<String, serde_json::Value>),
}

impl TryFrom<RawFieldSet> for FieldSet {
    type Error = serde_json::Error;

    fn try_from(raw: RawFieldSet) -> std::result::Result<Self, Self::Error> {
        let mut groups = match raw {
            RawFieldSet::List(fields) => return Ok(FieldSet::List(fields)),
            RawFieldSet::Keyed(groups) => groups,
        };

        if let Some(input_filter) = groups.shift_remove(INPUT_FILTER_KEY) {
            if !groups.is_empty() {
                debug!("Ignoring {} field groups beside {}", groups.len(), INPUT_FILTER_KEY);
            }
            let fields: Vec<Field> = serde_json::from_value(input_filter)?;
            let mut selected = IndexMap::new();
            selected.insert(INPUT_FILTER_KEY.to_string(), fields);
            return Ok(FieldSet::Keyed(selected));
        }

        groups
            .into_iter()
            .map(|(name, group)| {
                serde_json::from_value::<Vec<Field>>(group).map(|fields| (name, fields))
            })
            .collect::<std::result::Result<IndexMap<_, _>, serde_json::Error>>()
            .map(FieldSet::Keyed)
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        FieldSet::List(Vec::new())
    }
}

impl FieldSet {
    /// Fields that should be documented.
    ///
    /// A keyed set containing [`INPUT_FILTER_KEY`] contributes only that group; any other
    /// keyed set contributes all of its groups in order.
    pub fn selected(&self) -> Vec<&Field> {
        match self {
            FieldSet::List(fields) => fields.iter().collect(),
            FieldSet::Keyed(groups) => match groups.get(INPUT_FILTER_KEY) {
                Some(fields) => fields.iter().collect(),
                None => groups.values().flatten().collect(),
            },
        }
    }

    /// Append a field to the documented field list
    pub fn push(&mut self, field: Field) {
        match self {
            FieldSet::List(fields) => fields.push(field),
            FieldSet::Keyed(groups) => groups
                .entry(INPUT_FILTER_KEY.to_string())
                .or_default()
                .push(field),
        }
    }
}

/// Description of one REST service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub name: String,
    /// Route template, e.g. `/things[/:id]`
    pub route: String,
    /// Identifier segment name; empty for services without an entity route
    #[serde(default)]
    pub route_identifier_name: String,
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub entity_operations: Vec<Operation>,
    #[serde(default)]
    pub fields: FieldSet,
    #[serde(default)]
    pub request_accept_types: Vec<String>,
    #[serde(default)]
    pub api: ApiInfo,
    #[serde(default)]
    pub description: String,
}

impl ServiceDescriptor {
    /// Create a service with no operations, fields, or identifier
    pub fn new(name: impl Into<String>, route: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            route: route.into(),
            route_identifier_name: String::new(),
            operations: Vec::new(),
            entity_operations: Vec::new(),
            fields: FieldSet::default(),
            request_accept_types: Vec::new(),
            api: ApiInfo {
                version: version.into(),
            },
            description: String::new(),
        }
    }

    /// Identifier segment name when the service distinguishes collection and entity routes
    pub fn route_identifier(&self) -> Option<&str> {
        Some(self.route_identifier_name.as_str()).filter(|name| !name.is_empty())
    }
}

/// An API: a versioned, named group of services.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiDescriptor {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub services: Vec<ServiceDescriptor>,
}

impl ApiDescriptor {
    /// Load a descriptor from a `.json`, `.yaml` or `.yml` file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading API descriptor from {}", path.display());
        let content = fs::read_to_string(path)?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let api: ApiDescriptor = serde_json::from_str(content)?;
        Ok(api.inherit_version())
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let api: ApiDescriptor = serde_yaml::from_str(content)?;
        Ok(api.inherit_version())
    }

    /// Look up a service by name
    pub fn service(&self, name: &str) -> Result<&ServiceDescriptor> {
        self.services
            .iter()
            .find(|service| service.name == name)
            .ok_or_else(|| Error::UnknownService(name.to_string()))
    }

    // Services that don't state a version take the API's.
    fn inherit_version(mut self) -> Self {
        for service in &mut self.services {
            if service.api.version.is_empty() {
                service.api.version = self.version.clone();
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_carries_body() {
        assert!(HttpMethod::Post.carries_body());
        assert!(HttpMethod::Put.carries_body());
        assert!(HttpMethod::Patch.carries_body());
        assert!(!HttpMethod::Get.carries_body());
        assert!(!HttpMethod::Delete.carries_body());
        assert!(!HttpMethod::Head.carries_body());
    }

    #[test]
    fn test_method_display() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Options.as_str(), "OPTIONS");
        assert_eq!(HttpMethod::Other("PURGE".to_string()).to_string(), "PURGE");
    }

    #[test]
    fn test_nonstandard_methods_kept_verbatim() {
        let methods: Vec<HttpMethod> =
            serde_json::from_str(r#"["POST", "post", "PURGE"]"#).unwrap();

        assert_eq!(methods[0], HttpMethod::Post);
        assert_eq!(methods[1], HttpMethod::Other("post".to_string()));
        assert_eq!(methods[2], HttpMethod::Other("PURGE".to_string()));
        assert!(!methods[1].carries_body());
        assert_eq!(
            serde_json::to_string(&methods).unwrap(),
            r#"["POST","post","PURGE"]"#
        );
    }

    #[test]
    fn test_field_defaults() {
        let field = Field::new("name", "Name", false);
        assert_eq!(field.property_type(), "string");
        assert!(field.enum_values().is_none());
    }

    #[test]
    fn test_empty_enum_is_absent() {
        let field = Field::new("status", "Status", false).with_enum(Vec::<String>::new());
        assert!(field.enum_values().is_none());

        let field = Field::new("status", "Status", false).with_enum(["open", "closed"]);
        assert_eq!(field.enum_values().unwrap(), ["open", "closed"]);
    }

    #[test]
    fn test_route_identifier() {
        let mut service = ServiceDescriptor::new("Widget", "/widgets[/:id]", "1");
        assert_eq!(service.route_identifier(), None);

        service.route_identifier_name = "id".to_string();
        assert_eq!(service.route_identifier(), Some("id"));
    }

    #[test]
    fn test_field_set_prefers_input_filter() {
        let json = r#"{
            "other": [{"name": "ignored"}],
            "input_filter": [{"name": "kept", "required": true}]
        }"#;
        let fields: FieldSet = serde_json::from_str(json).unwrap();
        let selected = fields.selected();

        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "kept");
        assert!(selected[0].required);
    }

    #[test]
    fn test_input_filter_siblings_need_not_be_field_lists() {
        let json = r#"{
            "input_filter": [{"name": "kept"}],
            "validators": {"x": 1},
            "filters": "trim"
        }"#;
        let fields: FieldSet = serde_json::from_str(json).unwrap();
        let names: Vec<_> = fields.selected().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["kept"]);

        let yaml = r#"
validators:
  x: 1
input_filter:
  - name: kept
    required: true
"#;
        let fields: FieldSet = serde_yaml::from_str(yaml).unwrap();
        let selected = fields.selected();
        assert_eq!(selected.len(), 1);
        assert!(selected[0].required);
    }

    #[test]
    fn test_keyed_groups_must_be_field_lists_without_input_filter() {
        let json = r#"{"first": [{"name": "a"}], "validators": {"x": 1}}"#;
        assert!(serde_json::from_str::<FieldSet>(json).is_err());
    }

    #[test]
    fn test_field_set_keyed_without_input_filter() {
        let json = r#"{
            "first": [{"name": "a"}],
            "second": [{"name": "b"}, {"name": "c"}]
        }"#;
        let fields: FieldSet = serde_json::from_str(json).unwrap();
        let names: Vec<_> = fields.selected().iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_field_set_push_into_keyed() {
        let mut fields = FieldSet::Keyed(IndexMap::new());
        fields.push(Field::new("name", "", false));

        assert_eq!(fields.selected().len(), 1);
    }

    #[test]
    fn test_deserialize_service() {
        let json = r#"{
            "name": "Widget",
            "route": "/widgets[/:widget_id]",
            "routeIdentifierName": "widget_id",
            "operations": [
                {"httpMethod": "GET", "description": "List", "responseStatusCodes": {"200": "OK"}}
            ],
            "entityOperations": [
                {"httpMethod": "DELETE", "description": "Remove"}
            ],
            "fields": [
                {"name": "color", "type": "string", "enum": ["red", "blue"]}
            ],
            "requestAcceptTypes": ["application/json"],
            "api": {"version": "2"}
        }"#;
        let service: ServiceDescriptor = serde_json::from_str(json).unwrap();

        assert_eq!(service.route_identifier(), Some("widget_id"));
        assert_eq!(service.operations[0].http_method, HttpMethod::Get);
        assert_eq!(service.operations[0].response_status_codes[&200u16], "OK");
        assert_eq!(service.entity_operations[0].http_method, HttpMethod::Delete);
        assert_eq!(service.fields.selected()[0].enum_values().unwrap().len(), 2);
        assert_eq!(service.api.version, "2");
    }

    #[test]
    fn test_services_inherit_api_version() {
        let yaml = r#"
name: Shop
version: "3"
services:
  - name: Order
    route: /orders[/:order_id]
  - name: Invoice
    route: /invoices[/:invoice_id]
    api:
      version: "4"
"#;
        let api = ApiDescriptor::from_yaml_str(yaml).unwrap();

        assert_eq!(api.service("Order").unwrap().api.version, "3");
        assert_eq!(api.service("Invoice").unwrap().api.version, "4");
    }

    #[test]
    fn test_unknown_service() {
        let api = ApiDescriptor::from_json_str(r#"{"name": "Shop"}"#).unwrap();
        assert!(matches!(api.service("Order"), Err(Error::UnknownService(_))));
    }

    #[test]
    fn test_from_file_rejects_unknown_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("api.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"name = 'Shop'").unwrap();

        assert!(matches!(
            ApiDescriptor::from_file(&path),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_from_file_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("api.json");
        fs::write(&path, r#"{"name": "Shop", "version": "1", "services": []}"#).unwrap();

        let api = ApiDescriptor::from_file(&path).unwrap();
        assert_eq!(api.name, "Shop");
        assert!(api.services.is_empty());
    }
}
