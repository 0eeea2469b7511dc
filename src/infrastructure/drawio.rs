//! Draw.io document model with a tidy tree layout.
//!
//! Produces an uncompressed `mxfile` with one `<diagram>` per page.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::{debug, instrument, trace};

use crate::config::LayoutSettings;
use crate::infrastructure::traits::DiagramEngine;

/// Page name used when nodes arrive before any page was registered.
pub const DEFAULT_PAGE_NAME: &str = "Page-1";

const LINK_STYLE: &str = "endArrow=none;html=1;rounded=1;";

#[derive(Debug, Clone, PartialEq)]
pub struct DrawioNode {
    pub id: String,
    pub label: String,
    pub style: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawioLink {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default)]
pub struct DrawioPage {
    pub id: String,
    pub name: String,
    pub nodes: Vec<DrawioNode>,
    pub links: Vec<DrawioLink>,
}

impl DrawioPage {
    fn new(index: usize, name: &str) -> Self {
        Self {
            id: format!("page-{index}"),
            name: name.to_string(),
            nodes: Vec::new(),
            links: Vec::new(),
        }
    }

    pub fn node(&self, id: &str) -> Option<&DrawioNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Multi-page draw.io diagram.
#[derive(Debug, Clone, Default)]
pub struct DrawioDiagram {
    pages: Vec<DrawioPage>,
    settings: LayoutSettings,
}

impl DrawioDiagram {
    pub fn new(settings: LayoutSettings) -> Self {
        Self {
            pages: Vec::new(),
            settings,
        }
    }

    pub fn pages(&self) -> &[DrawioPage] {
        &self.pages
    }

    fn current_page(&mut self) -> &mut DrawioPage {
        if self.pages.is_empty() {
            self.pages.push(DrawioPage::new(0, DEFAULT_PAGE_NAME));
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

impl DiagramEngine for DrawioDiagram {
    fn add_diagram(&mut self, name: &str) {
        debug!("add_diagram: {}", name);
        let page = DrawioPage::new(self.pages.len(), name);
        self.pages.push(page);
    }

    fn add_node(&mut self, id: &str, label: &str, style: &str) {
        trace!("add_node: id={} label={}", id, label);
        self.current_page().nodes.push(DrawioNode {
            id: id.to_string(),
            label: label.to_string(),
            style: style.to_string(),
            x: 0.0,
            y: 0.0,
        });
    }

    fn add_link(&mut self, source: &str, target: &str) {
        trace!("add_link: {} -> {}", source, target);
        self.current_page().links.push(DrawioLink {
            id: format!("{source}-{target}"),
            source: source.to_string(),
            target: target.to_string(),
        });
    }

    #[instrument(level = "debug", skip(self))]
    fn layout(&mut self) {
        let settings = self.settings.clone();
        for page in &mut self.pages {
            TreeLayout::new(page, &settings).apply(page);
        }
    }

    fn dump_xml(&self) -> String {
        self.to_string()
    }
}

/// Reingold-Tilford style placement: leaves are packed left to right,
/// parents are centered over their children, one row per depth.
struct TreeLayout {
    children: HashMap<String, Vec<String>>,
    roots: Vec<String>,
    positions: HashMap<String, (f64, f64)>,
    next_x: f64,
    column: f64,
    row: f64,
}

impl TreeLayout {
    fn new(page: &DrawioPage, settings: &LayoutSettings) -> Self {
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        let mut targets = HashSet::new();
        for link in &page.links {
            children
                .entry(link.source.clone())
                .or_default()
                .push(link.target.clone());
            targets.insert(link.target.as_str());
        }
        let roots = page
            .nodes
            .iter()
            .filter(|n| !targets.contains(n.id.as_str()))
            .map(|n| n.id.clone())
            .collect();

        Self {
            children,
            roots,
            positions: HashMap::new(),
            next_x: 0.0,
            column: f64::from(settings.node_width + settings.horizontal_gap),
            row: f64::from(settings.node_height + settings.vertical_gap),
        }
    }

    fn apply(mut self, page: &mut DrawioPage) {
        let roots = std::mem::take(&mut self.roots);
        for root in &roots {
            self.place(root, 0);
        }
        for node in &mut page.nodes {
            if let Some(&(x, y)) = self.positions.get(&node.id) {
                node.x = x;
                node.y = y;
            }
        }
    }

    /// Place `id` and its subtree, returning the node's x coordinate.
    fn place(&mut self, id: &str, depth: usize) -> f64 {
        if let Some(&(x, _)) = self.positions.get(id) {
            return x;
        }
        // Reserve the slot first so a cyclic link cannot recurse forever.
        let y = depth as f64 * self.row;
        self.positions.insert(id.to_string(), (self.next_x, y));

        // each id is placed once, so its child list can be taken out
        let kids = self.children.remove(id).unwrap_or_default();
        let mut placed = Vec::with_capacity(kids.len());
        for kid in &kids {
            if !self.positions.contains_key(kid.as_str()) {
                placed.push(self.place(kid, depth + 1));
            }
        }

        let x = match (placed.first(), placed.last()) {
            (Some(first), Some(last)) => (first + last) / 2.0,
            _ => {
                let x = self.next_x;
                self.next_x += self.column;
                x
            }
        };
        self.positions.insert(id.to_string(), (x, y));
        x
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

impl fmt::Display for DrawioDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, r#"<mxfile host="diomindmap" type="device" compressed="false">"#)?;
        for page in &self.pages {
            writeln!(
                f,
                r#"  <diagram id="{}" name="{}">"#,
                escape_xml(&page.id),
                escape_xml(&page.name)
            )?;
            writeln!(
                f,
                r#"    <mxGraphModel dx="0" dy="0" grid="1" gridSize="10" guides="1" tooltips="1" connect="1" arrows="1" fold="1" page="1" pageScale="1" pageWidth="1100" pageHeight="850" math="0" shadow="0">"#
            )?;
            writeln!(f, "      <root>")?;
            writeln!(f, r#"        <mxCell id="0" />"#)?;
            writeln!(f, r#"        <mxCell id="1" parent="0" />"#)?;
            for node in &page.nodes {
                writeln!(
                    f,
                    r#"        <mxCell id="{}" value="{}" style="{}" vertex="1" parent="1">"#,
                    escape_xml(&node.id),
                    escape_xml(&node.label),
                    escape_xml(&node.style)
                )?;
                writeln!(
                    f,
                    r#"          <mxGeometry x="{}" y="{}" width="{}" height="{}" as="geometry" />"#,
                    node.x, node.y, self.settings.node_width, self.settings.node_height
                )?;
                writeln!(f, "        </mxCell>")?;
            }
            for link in &page.links {
                writeln!(
                    f,
                    r#"        <mxCell id="{}" style="{}" edge="1" parent="1" source="{}" target="{}">"#,
                    escape_xml(&link.id),
                    LINK_STYLE,
                    escape_xml(&link.source),
                    escape_xml(&link.target)
                )?;
                writeln!(f, r#"          <mxGeometry relative="1" as="geometry" />"#)?;
                writeln!(f, "        </mxCell>")?;
            }
            writeln!(f, "      </root>")?;
            writeln!(f, "    </mxGraphModel>")?;
            writeln!(f, "  </diagram>")?;
        }
        writeln!(f, "</mxfile>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> LayoutSettings {
        LayoutSettings {
            node_width: 100,
            node_height: 50,
            horizontal_gap: 20,
            vertical_gap: 30,
        }
    }

    #[test]
    fn given_node_without_page_when_adding_then_default_page_created() {
        let mut diagram = DrawioDiagram::new(settings());
        diagram.add_node("n", "N", "rounded=1");
        assert_eq!(diagram.pages().len(), 1);
        assert_eq!(diagram.pages()[0].name, DEFAULT_PAGE_NAME);
    }

    #[test]
    fn given_small_tree_when_layout_then_parent_centered_over_children() {
        let mut diagram = DrawioDiagram::new(settings());
        diagram.add_diagram("A");
        diagram.add_node("a", "A", "");
        diagram.add_node("b", "B", "");
        diagram.add_node("c", "C", "");
        diagram.add_link("a", "b");
        diagram.add_link("a", "c");

        diagram.layout();

        let page = &diagram.pages()[0];
        let (a, b, c) = (
            page.node("a").unwrap(),
            page.node("b").unwrap(),
            page.node("c").unwrap(),
        );
        assert_eq!((b.x, b.y), (0.0, 80.0));
        assert_eq!((c.x, c.y), (120.0, 80.0));
        assert_eq!((a.x, a.y), (60.0, 0.0));
    }

    #[test]
    fn given_node_linked_from_two_parents_when_layout_then_placed_under_first() {
        let mut diagram = DrawioDiagram::new(settings());
        diagram.add_diagram("A");
        for id in ["a", "b", "c", "d"] {
            diagram.add_node(id, id, "");
        }
        diagram.add_link("a", "b");
        diagram.add_link("a", "c");
        diagram.add_link("b", "d");
        diagram.add_link("c", "d");

        diagram.layout();

        let page = &diagram.pages()[0];
        let pos = |id: &str| {
            let n = page.node(id).unwrap();
            (n.x, n.y)
        };
        assert_eq!(pos("d"), (0.0, 160.0));
        assert_eq!(pos("b"), (0.0, 80.0));
        assert_eq!(pos("c"), (120.0, 80.0));
        assert_eq!(pos("a"), (60.0, 0.0));
    }

    #[test]
    fn given_labels_with_markup_when_dumped_then_escaped() {
        let mut diagram = DrawioDiagram::new(settings());
        diagram.add_diagram("Q&A");
        diagram.add_node("n", "<b>\"x\"</b>", "rounded=1");

        let xml = diagram.dump_xml();

        assert!(xml.contains(r#"name="Q&amp;A""#));
        assert!(xml.contains("value=\"&lt;b&gt;&quot;x&quot;&lt;/b&gt;\""));
        assert!(xml.starts_with("<mxfile"));
        assert!(xml.trim_end().ends_with("</mxfile>"));
    }

    #[test]
    fn given_empty_diagram_when_dumped_then_only_mxfile() {
        let diagram = DrawioDiagram::new(settings());
        assert!(!diagram.dump_xml().contains("<diagram"));
    }
}
