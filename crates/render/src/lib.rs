pub mod template;

use extract::{ClassNode, ModelGraph};
use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Grid placement of class boxes on the diagram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramLayout {
    pub columns: usize,
    pub class_width: u32,
    pub header_height: u32,
    pub row_height: u32,
    pub spacing: u32,
}

impl Default for DiagramLayout {
    fn default() -> Self {
        Self {
            columns: 4,
            class_width: 220,
            header_height: 30,
            row_height: 26,
            spacing: 60,
        }
    }
}

impl DiagramLayout {
    pub fn class_height(&self, class: &ClassNode) -> u32 {
        self.header_height + self.row_height * class.elements.len() as u32
    }
}

/// Text shown for one element row.
pub fn element_value(label: &str, data_type: &str, primary_key: bool) -> String {
    let mut value = String::new();
    if primary_key {
        value.push_str("PK ");
    }
    value.push_str(label);
    if !data_type.is_empty() {
        value.push_str(" : ");
        value.push_str(data_type);
    }
    value
}

/// Render a model graph as a draw.io entity diagram.
pub fn render_diagram(graph: &ModelGraph, layout: &DiagramLayout) -> String {
    let columns = layout.columns.max(1);
    let class_ids: HashSet<&str> = graph.classes.iter().map(|c| c.id.as_str()).collect();
    let mut cells = String::new();

    let mut y = 0;
    for row in graph.classes.chunks(columns) {
        let mut x = 0;
        let mut row_height = 0;

        for class in row {
            let height = layout.class_height(class);
            cells.push_str(&template::class_cell(
                &escape(&class.id),
                &escape(&class.label),
                x,
                y,
                layout.class_width,
                height,
            ));

            for (i, element) in class.elements.iter().enumerate() {
                let value =
                    element_value(&element.label, &element.data_type, element.is_primary_key);
                cells.push_str(&template::element_cell(
                    &escape(&element.id),
                    &escape(&class.id),
                    &escape(&value),
                    element.is_primary_key,
                    layout.header_height + layout.row_height * i as u32,
                    layout.class_width,
                    layout.row_height,
                ));
            }

            row_height = row_height.max(height);
            x += layout.class_width + layout.spacing;
        }

        y += row_height + layout.spacing;
    }

    for class in &graph.classes {
        for link in &class.links {
            if !class_ids.contains(link.target_id.as_str()) {
                warn!(
                    link_id = %link.id,
                    target_id = %link.target_id,
                    "Link target is not a class in this model, skipping"
                );
                continue;
            }
            cells.push_str(&template::link_cell(
                &escape(&link.id),
                &escape(&link.source_id),
                &escape(&link.target_id),
            ));
        }
    }

    debug!(model_id = %graph.model_id, classes = graph.classes.len(), "Rendered diagram");
    template::document(&escape(&graph.model_id), &cells)
}

/// Render straight from the extractor's JSON output.
pub fn render_json(json: &str, layout: &DiagramLayout) -> serde_json::Result<String> {
    let graph: ModelGraph = serde_json::from_str(json)?;
    Ok(render_diagram(&graph, layout))
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract::{ElementNode, LinkEdge};

    fn class(id: &str, label: &str, elements: Vec<ElementNode>, links: Vec<LinkEdge>) -> ClassNode {
        ClassNode {
            id: id.to_string(),
            label: label.to_string(),
            elements,
            links,
        }
    }

    fn element(id: &str, label: &str, data_type: &str, pk: bool) -> ElementNode {
        ElementNode {
            id: id.to_string(),
            label: label.to_string(),
            data_type: data_type.to_string(),
            is_primary_key: pk,
        }
    }

    fn link(id: &str, source: &str, target: &str) -> LinkEdge {
        LinkEdge {
            id: id.to_string(),
            source_id: source.to_string(),
            target_id: target.to_string(),
        }
    }

    fn sample() -> ModelGraph {
        ModelGraph {
            model_id: "m1".to_string(),
            classes: vec![
                class(
                    "c1",
                    "Person",
                    vec![
                        element("e1", "person_id", "integer", true),
                        element("e2", "name", "varchar", false),
                    ],
                    vec![link("l1", "c1", "c2"), link("l2", "c1", "elsewhere")],
                ),
                class("c2", "Address", vec![element("e3", "line_1", "", false)], vec![]),
            ],
        }
    }

    #[test]
    fn test_element_value() {
        assert_eq!(element_value("person_id", "integer", true), "PK person_id : integer");
        assert_eq!(element_value("line_1", "", false), "line_1");
    }

    #[test]
    fn test_render_cells() {
        let xml = render_diagram(&sample(), &DiagramLayout::default());

        assert!(xml.starts_with("<mxfile"));
        assert!(xml.contains(r#"<mxCell id="c1" value="Person""#));
        assert!(xml.contains(r#"<mxCell id="e1" value="PK person_id : integer""#));
        assert!(xml.contains(r#"parent="c1""#));
        assert!(xml.contains(r#"<mxCell id="e3" value="line_1""#));
        assert!(xml.contains(r#"edge="1" parent="1" source="c1" target="c2""#));
        assert!(!xml.contains("elsewhere"));
    }

    #[test]
    fn test_class_grid() {
        let layout = DiagramLayout {
            columns: 1,
            ..DiagramLayout::default()
        };
        let xml = render_diagram(&sample(), &layout);

        // first class: header + two rows, then spacing
        let second_y = 30 + 2 * 26 + 60;
        assert!(xml.contains(r#"<mxGeometry x="0" y="0" width="220" height="82""#));
        assert!(xml.contains(&format!(r#"<mxGeometry x="0" y="{}" width="220" height="56""#, second_y)));
    }

    #[test]
    fn test_text_is_escaped() {
        let graph = ModelGraph {
            model_id: "m1".to_string(),
            classes: vec![class("c1", "Orders & \"Items\"", vec![element("e1", "<qty>", "int", false)], vec![])],
        };

        let xml = render_diagram(&graph, &DiagramLayout::default());

        assert!(xml.contains("Orders &amp; &quot;Items&quot;"));
        assert!(xml.contains("&lt;qty&gt; : int"));
        assert!(!xml.contains("<qty>"));
    }

    #[test]
    fn test_render_from_json() {
        let json = serde_json::to_string(&sample()).unwrap();
        let xml = render_json(&json, &DiagramLayout::default()).unwrap();
        assert_eq!(xml, render_diagram(&sample(), &DiagramLayout::default()));

        assert!(render_json("{\"classes\": []}", &DiagramLayout::default()).is_err());
    }
}
