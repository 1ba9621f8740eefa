//! An inspectable unit of the rendered document graph.

use jsongraph_path::Path;

use crate::rows::Row;

/// One node of the document graph: a stable id, the rows the inspector
/// displays, and the structural path of the node's value inside the root
/// document.
///
/// Nodes are owned by the external graph builder; the edit session holds
/// at most a cloned snapshot plus, transiently, one locally synthesized
/// overlay copy. Equality is by content, which is what reconciliation
/// compares.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub rows: Vec<Row>,
    pub path: Path,
}

impl Node {
    pub fn new(id: impl Into<String>, rows: Vec<Row>, path: Path) -> Self {
        Node {
            id: id.into(),
            rows,
            path,
        }
    }
}
