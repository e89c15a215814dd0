pub mod normalizer;
pub mod schema;

pub use normalizer::PrimaryKeyMarker;
pub use schema::{ClassNode, ElementNode, LinkEdge, ModelGraph};

use catalogue::validate::require_uuid;
use catalogue::wire::DataClassItem;
use catalogue::{CatalogueClient, CatalogueResult};
use tracing::{debug, info};

/// Walks one data model and assembles its [`ModelGraph`].
pub struct ModelExtractor {
    client: CatalogueClient,
    marker: PrimaryKeyMarker,
}

impl ModelExtractor {
    pub fn new(client: CatalogueClient) -> Self {
        Self::with_marker(client, PrimaryKeyMarker::default())
    }

    pub fn with_marker(client: CatalogueClient, marker: PrimaryKeyMarker) -> Self {
        Self { client, marker }
    }

    /// Extract classes, elements, primary keys and outgoing links of a model,
    /// in the order the service lists them.
    pub async fn extract(&self, model_id: &str) -> CatalogueResult<ModelGraph> {
        require_uuid("model id", model_id)?;

        info!(model_id, "Attempting to retrieve model");
        let mut graph = ModelGraph::new(model_id);

        for found_class in self.client.classes_in_model(model_id).await? {
            info!(class_id = %found_class.id, label = %found_class.label, "Found class");
            let class = self.extract_class(model_id, &found_class).await?;
            graph.classes.push(class);
        }

        info!(
            model_id,
            classes = graph.classes.len(),
            elements = graph.element_count(),
            links = graph.link_count(),
            "Model extracted"
        );
        Ok(graph)
    }

    /// A class is only returned once its elements and links are complete.
    async fn extract_class(
        &self,
        model_id: &str,
        found_class: &DataClassItem,
    ) -> CatalogueResult<ClassNode> {
        let mut elements = Vec::new();

        for found_element in self.client.elements_in_class(model_id, &found_class.id).await? {
            debug!(element_id = %found_element.id, label = %found_element.label, "Found element");

            let metadata = self.client.element_metadata(&found_element.id).await?;
            let element = normalizer::element_node(&found_element, &metadata, &self.marker);
            if element.is_primary_key {
                debug!(element_id = %element.id, "Element is a primary key");
            }
            elements.push(element);
        }

        let found_links = self.client.links_in_class(&found_class.id).await?;
        let links = normalizer::outgoing_links(&found_class.id, &found_links);
        debug!(
            class_id = %found_class.id,
            listed = found_links.len(),
            outgoing = links.len(),
            "Filtered class links"
        );

        Ok(ClassNode {
            id: found_class.id.clone(),
            label: found_class.label.clone(),
            elements,
            links,
        })
    }
}
