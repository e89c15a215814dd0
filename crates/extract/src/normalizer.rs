use catalogue::wire::{DataElementItem, MetadataItem, SemanticLinkItem};

use crate::schema::{ElementNode, LinkEdge};

pub const PK_NAMESPACE: &str = "BusinessEntityDiagram.will-list.co.uk";
pub const PK_KEY: &str = "BusinessEntityUniqueIdentifier";
pub const PK_VALUE: &str = "true";

/// The metadata entry that flags an element as its class's primary key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryKeyMarker {
    pub namespace: String,
    pub key: String,
    pub value: String,
}

impl Default for PrimaryKeyMarker {
    fn default() -> Self {
        Self {
            namespace: PK_NAMESPACE.to_string(),
            key: PK_KEY.to_string(),
            value: PK_VALUE.to_string(),
        }
    }
}

impl PrimaryKeyMarker {
    /// Exact match on all three parts.
    pub fn matches(&self, entry: &MetadataItem) -> bool {
        entry.namespace == self.namespace && entry.key == self.key && entry.value == self.value
    }

    pub fn is_marked(&self, metadata: &[MetadataItem]) -> bool {
        metadata.iter().any(|entry| self.matches(entry))
    }
}

/// Build an output element. A missing data type becomes an empty string.
pub fn element_node(
    element: &DataElementItem,
    metadata: &[MetadataItem],
    marker: &PrimaryKeyMarker,
) -> ElementNode {
    ElementNode {
        id: element.id.clone(),
        label: element.label.clone(),
        data_type: element
            .data_type
            .as_ref()
            .map(|t| t.label.clone())
            .unwrap_or_default(),
        is_primary_key: marker.is_marked(metadata),
    }
}

/// Keep the links that leave `class_id`. The service also lists links that
/// point at the class; those belong to the class at their other end.
pub fn outgoing_links(class_id: &str, links: &[SemanticLinkItem]) -> Vec<LinkEdge> {
    links
        .iter()
        .filter(|link| link.source.id == class_id)
        .map(|link| LinkEdge {
            id: link.id.clone(),
            source_id: class_id.to_string(),
            target_id: link.target.id.clone(),
        })
        .collect()
}
