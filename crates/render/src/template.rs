//! draw.io (mxGraph) markup fragments. Callers pass already-escaped text.

pub const CLASS_STYLE: &str = "swimlane;fontStyle=1;childLayout=stackLayout;horizontal=1;startSize=30;horizontalStack=0;resizeParent=1;resizeParentMax=0;resizeLast=0;collapsible=1;marginBottom=0;html=1;";

pub const ELEMENT_STYLE: &str = "text;strokeColor=none;fillColor=none;align=left;verticalAlign=middle;spacingLeft=4;spacingRight=4;overflow=hidden;rotatable=0;points=[[0,0.5],[1,0.5]];portConstraint=eastwest;html=1;";

pub const PK_ELEMENT_STYLE: &str = "text;strokeColor=none;fillColor=none;align=left;verticalAlign=middle;spacingLeft=4;spacingRight=4;overflow=hidden;rotatable=0;points=[[0,0.5],[1,0.5]];portConstraint=eastwest;fontStyle=5;html=1;";

pub const LINK_STYLE: &str = "edgeStyle=entityRelationEdgeStyle;fontSize=12;html=1;endArrow=ERmany;startArrow=ERmandOne;endFill=0;";

pub fn document(diagram_id: &str, cells: &str) -> String {
    format!(
        r#"<mxfile host="catalogue">
  <diagram id="{diagram_id}" name="{diagram_id}">
    <mxGraphModel grid="1" gridSize="10" guides="1" tooltips="1" connect="1" arrows="1" fold="1" page="1" pageScale="1" math="0" shadow="0">
      <root>
        <mxCell id="0" />
        <mxCell id="1" parent="0" />
{cells}      </root>
    </mxGraphModel>
  </diagram>
</mxfile>
"#
    )
}

pub fn class_cell(id: &str, label: &str, x: u32, y: u32, width: u32, height: u32) -> String {
    format!(
        r#"        <mxCell id="{id}" value="{label}" style="{CLASS_STYLE}" vertex="1" parent="1">
          <mxGeometry x="{x}" y="{y}" width="{width}" height="{height}" as="geometry" />
        </mxCell>
"#
    )
}

pub fn element_cell(
    id: &str,
    parent: &str,
    value: &str,
    primary_key: bool,
    y: u32,
    width: u32,
    height: u32,
) -> String {
    let style = if primary_key { PK_ELEMENT_STYLE } else { ELEMENT_STYLE };
    format!(
        r#"        <mxCell id="{id}" value="{value}" style="{style}" vertex="1" parent="{parent}">
          <mxGeometry y="{y}" width="{width}" height="{height}" as="geometry" />
        </mxCell>
"#
    )
}

pub fn link_cell(id: &str, source: &str, target: &str) -> String {
    format!(
        r#"        <mxCell id="{id}" style="{LINK_STYLE}" edge="1" parent="1" source="{source}" target="{target}">
          <mxGeometry relative="1" as="geometry" />
        </mxCell>
"#
    )
}
