use crate::descriptor::Field;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// Model generator - folds service fields into Swagger 1.2 models
pub struct ModelGenerator {
    /// Model id used for fields without a prefix
    default_model: String,
    /// Models in order of first appearance
    models: IndexMap<String, Model>,
}

/// Swagger 1.2 model definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    /// Names of required properties, in field order
    pub required: Vec<String>,
    pub properties: IndexMap<String, Property>,
}

/// Property of a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Primitive or model name, or `array`
    #[serde(rename = "type")]
    pub property_type: String,
    pub description: String,
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    /// Element type for array properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
}

/// Element type of an array property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Items {
    #[serde(rename = "type")]
    pub item_type: String,
}

impl Model {
    /// Create an empty model
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            required: Vec::new(),
            properties: IndexMap::new(),
        }
    }
}

impl Property {
    /// Build a property from a declared type; `[Inner]` becomes an array of `Inner`
    pub fn from_type(declared: &str, description: impl Into<String>) -> Self {
        let (property_type, items) = match array_item_type(declared) {
            Some(inner) => (
                "array".to_string(),
                Some(Items {
                    item_type: inner.to_string(),
                }),
            ),
            None => (declared.to_string(), None),
        };

        Self {
            property_type,
            description: description.into(),
            enum_values: None,
            items,
        }
    }
}

impl ModelGenerator {
    /// Create a generator whose default model is `service_name`.
    ///
    /// The default model always exists, even when no field is added.
    pub fn new(service_name: &str) -> Self {
        debug!("Initializing ModelGenerator for {}", service_name);
        let mut models = IndexMap::new();
        models.insert(service_name.to_string(), Model::new(service_name));
        Self {
            default_model: service_name.to_string(),
            models,
        }
    }

    /// Fold a field into the model its name points to.
    ///
    /// `"address/street"` becomes property `street` of model `address`; a name without a
    /// prefix belongs to the default model. Re-declaring a property replaces the earlier one,
    /// while every required declaration appends to the model's `required` list.
    pub fn add_field(&mut self, field: &Field) {
        let (model_id, property_name) = match field.name.split_once('/') {
            Some((prefix, rest)) => (prefix, rest),
            None => (self.default_model.as_str(), field.name.as_str()),
        };

        debug!("Adding property {} to model {}", property_name, model_id);

        let mut property = Property::from_type(field.property_type(), field.description.clone());
        property.enum_values = field.enum_values().map(<[String]>::to_vec);

        let model = self
            .models
            .entry(model_id.to_string())
            .or_insert_with(|| Model::new(model_id));

        model.properties.insert(property_name.to_string(), property);

        if field.required {
            model.required.push(property_name.to_string());
        }
    }

    /// Fold every field, in order
    pub fn add_fields<'a, I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = &'a Field>,
    {
        for field in fields {
            self.add_field(field);
        }
    }

    /// Get all generated models
    pub fn get_models(&self) -> &IndexMap<String, Model> {
        &self.models
    }

    pub fn into_models(self) -> IndexMap<String, Model> {
        self.models
    }
}

/// Inner type of a fully bracketed type such as `[Tag]`
fn array_item_type(declared: &str) -> Option<&str> {
    declared.strip_prefix('[')?.strip_suffix(']')
}
