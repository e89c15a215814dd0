//! Response bodies as the catalogue service sends them.

use serde::{Deserialize, Serialize};

/// Listing endpoints wrap their results in `{"items": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Items<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breadcrumb {
    pub id: String,
    pub domain_type: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalised: Option<bool>,
}

/// Body of `GET /dataModels/path/{path}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathLookup {
    pub id: String,
    pub domain_type: String,
    pub label: String,
    /// Only sent for models.
    #[serde(default)]
    pub finalised: Option<bool>,
    /// Absent on some responses; the resolver treats that as a mismatch.
    #[serde(default)]
    pub breadcrumbs: Option<Vec<Breadcrumb>>,
}

impl PathLookup {
    /// The looked-up entity as the last step of its own trail.
    pub fn leaf(&self) -> Breadcrumb {
        Breadcrumb {
            id: self.id.clone(),
            domain_type: self.domain_type.clone(),
            label: self.label.clone(),
            finalised: self.finalised,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataClassItem {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTypeRef {
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataElementItem {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub data_type: Option<DataTypeRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataItem {
    pub id: String,
    pub namespace: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticLinkItem {
    pub id: String,
    #[serde(rename = "sourceMultiFacetAwareItem")]
    pub source: ItemRef,
    #[serde(rename = "targetMultiFacetAwareItem")]
    pub target: ItemRef,
}
