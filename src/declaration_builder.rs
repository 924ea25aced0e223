use crate::descriptor::{HttpMethod, Operation, ServiceDescriptor};
use crate::error::Result;
use crate::model_generator::{Model, ModelGenerator};
use crate::route;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// Swagger specification version emitted by the builders
pub const SWAGGER_VERSION: &str = "1.2";

/// Swagger 1.2 API declaration builder
pub struct DeclarationBuilder {
    /// Base URL the API is served from
    base_url: String,
}

/// Complete Swagger 1.2 API declaration for one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerApiDeclaration {
    pub api_version: String,
    pub swagger_version: String,
    pub base_path: String,
    pub resource_path: String,
    /// Operation groups; collection group before entity group
    pub apis: Vec<OperationGroup>,
    pub produces: Vec<String>,
    pub models: IndexMap<String, Model>,
}

/// Operations sharing one path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationGroup {
    pub operations: Vec<OperationRecord>,
    pub path: String,
}

/// Swagger 1.2 operation object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRecord {
    pub method: HttpMethod,
    pub summary: String,
    pub notes: String,
    pub nickname: String,
    #[serde(rename = "type")]
    pub response_type: String,
    pub parameters: Vec<Parameter>,
    pub response_messages: IndexMap<u16, String>,
}

/// Swagger 1.2 parameter object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub param_type: ParamType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<u32>,
    /// Model carried in the request body
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
}

/// Where a parameter is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Path,
    Body,
}

impl Parameter {
    /// Parameter for a `{name}` placeholder of the route.
    ///
    /// Path parameters are documented as not required.
    pub fn path(name: &str) -> Self {
        Self {
            name: name.to_string(),
            param_type: ParamType::Path,
            description: Some(format!("URL parameter {}", name)),
            data_type: Some("string".to_string()),
            required: false,
            minimum: Some(0),
            maximum: Some(1),
            body_type: None,
        }
    }

    /// Request body carrying an entity of model `type_name`
    pub fn body(type_name: &str) -> Self {
        Self {
            name: "body".to_string(),
            param_type: ParamType::Body,
            description: None,
            data_type: None,
            required: true,
            minimum: None,
            maximum: None,
            body_type: Some(type_name.to_string()),
        }
    }
}

impl DeclarationBuilder {
    /// Create a builder for APIs served under `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        debug!("Initializing DeclarationBuilder for {}", base_url);
        Self { base_url }
    }

    /// Build the API declaration of a service.
    ///
    /// Fails when the route has no optional `[...]` segment, since the resource path is
    /// the part of the route before it.
    pub fn build(&self, service: &ServiceDescriptor) -> Result<SwaggerApiDeclaration> {
        debug!("Building API declaration for {} ({})", service.name, service.route);

        let resource_path = route::resource_path(&service.route)?;
        let template_path = route::to_swagger_path(&service.route);

        let path_parameters: Vec<Parameter> = route::path_parameter_names(&template_path)
            .iter()
            .map(|name| Parameter::path(name))
            .collect();
        debug!("Path {} has {} parameters", template_path, path_parameters.len());

        let apis = match service.route_identifier() {
            Some(identifier) => {
                let collection_parameters: Vec<Parameter> = path_parameters
                    .iter()
                    .filter(|parameter| parameter.name != identifier)
                    .cloned()
                    .collect();

                vec![
                    OperationGroup {
                        operations: Self::operation_records(
                            service,
                            &service.operations,
                            &collection_parameters,
                        ),
                        path: route::collection_path(&template_path, identifier),
                    },
                    OperationGroup {
                        operations: Self::operation_records(
                            service,
                            &service.entity_operations,
                            &path_parameters,
                        ),
                        path: template_path,
                    },
                ]
            }
            None => vec![OperationGroup {
                operations: Self::operation_records(service, &service.operations, &path_parameters),
                path: template_path,
            }],
        };

        let mut model_gen = ModelGenerator::new(&service.name);
        model_gen.add_fields(service.fields.selected());

        Ok(SwaggerApiDeclaration {
            api_version: service.api.version.clone(),
            swagger_version: SWAGGER_VERSION.to_string(),
            base_path: self.base_url.clone(),
            resource_path: resource_path.to_string(),
            apis,
            produces: service.request_accept_types.clone(),
            models: model_gen.into_models(),
        })
    }

    fn operation_records(
        service: &ServiceDescriptor,
        operations: &[Operation],
        path_parameters: &[Parameter],
    ) -> Vec<OperationRecord> {
        operations
            .iter()
            .map(|operation| {
                let method = &operation.http_method;
                let mut parameters = path_parameters.to_vec();
                if method.carries_body() {
                    parameters.push(Parameter::body(&service.name));
                }

                OperationRecord {
                    method: method.clone(),
                    summary: operation.description.clone(),
                    notes: operation.description.clone(),
                    nickname: format!("{} for {}", method, service.name),
                    response_type: service.name.clone(),
                    parameters,
                    response_messages: operation.response_status_codes.clone(),
                }
            })
            .collect()
    }
}
