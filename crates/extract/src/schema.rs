use serde::{Deserialize, Serialize};

/// One extracted data model: the JSON document handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelGraph {
    pub model_id: String,
    pub classes: Vec<ClassNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassNode {
    pub id: String,
    pub label: String,
    pub elements: Vec<ElementNode>,
    /// Outgoing only: `source_id` is always this class.
    pub links: Vec<LinkEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    pub id: String,
    pub label: String,
    pub data_type: String,
    #[serde(rename = "is_pk")]
    pub is_primary_key: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEdge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
}

impl ModelGraph {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            classes: Vec::new(),
        }
    }

    pub fn element_count(&self) -> usize {
        self.classes.iter().map(|c| c.elements.len()).sum()
    }

    pub fn link_count(&self) -> usize {
        self.classes.iter().map(|c| c.links.len()).sum()
    }
}
