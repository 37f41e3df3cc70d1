//! Graph document loading
//!
//! A document lists edges as id pairs and optionally the full vertex list.
//! Without `nodes`, vertices are added in order of first appearance in
//! `edges`; with it, the listed order is the enumeration order and isolated
//! vertices are kept.

use std::fs;
use std::path::{Path, PathBuf};

use edmonds_core::{AlgorithmError, Graph, NodeId};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed graph document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Graph(#[from] AlgorithmError),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Option<Vec<NodeId>>,
    pub edges: Vec<(NodeId, NodeId)>,
}

impl GraphDocument {
    pub fn parse(text: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn into_graph(self) -> Result<Graph, InputError> {
        let Some(nodes) = self.nodes else {
            return Ok(Graph::from_edges(self.edges)?);
        };

        let mut graph = Graph::new();
        for id in nodes {
            graph.add_node(id)?;
        }
        for (a, b) in self.edges {
            graph.add_edge(a, b)?;
        }
        Ok(graph)
    }
}

pub fn load_graph(path: &Path) -> Result<Graph, InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    GraphDocument::parse(&text)?.into_graph()
}
