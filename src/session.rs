//! Explicit session context replacing the original ambient UI state.
//!
//! A `Session` owns the document, the backing path, and the current
//! search/filter selections. Mutations follow a strict write-then-persist
//! sequence; reads rebuild the graph from the current snapshot every time
//! (no incremental or cached graph state).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::graph::{self, Graph};
use crate::query;
use crate::render::{self, ScenePlan};
use crate::store::{self, Document, Edge, Node};

/// One interaction cycle's read-only output: the built graph, the resolved
/// highlight, the adapter-ready scene plan, and the detail edge list for
/// the highlighted node.
#[derive(Debug)]
pub struct SessionView {
    pub graph: Graph,
    pub highlight: Option<String>,
    pub scene: ScenePlan,
    pub detail_edges: Vec<Edge>,
}

/// Session state for one backing document. Exactly one active session per
/// backing file in the intended deployment, so no locking is involved.
pub struct Session {
    path: PathBuf,
    document: Document,
    search_text: String,
    // Empty selection means "show everything", distinct from no selection
    // only in the UI; both pass every relation type.
    selected_types: BTreeSet<String>,
}

impl Session {
    /// Open a session on the backing document, loading it (or the default
    /// empty document when the file does not exist).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let document = store::load(&path)?;
        log::info!(
            "Session opened: project \"{}\", {} nodes, {} edges",
            document.meta.project,
            document.nodes.len(),
            document.edges.len()
        );
        Ok(Self {
            path,
            document,
            search_text: String::new(),
            selected_types: BTreeSet::new(),
        })
    }

    /// Open a session, naming a fresh document after `default_project`
    /// instead of "Untitled". An existing backing document keeps the
    /// project name it already carries.
    pub fn open_with_project<P: AsRef<Path>>(path: P, default_project: &str) -> Result<Self> {
        let existed = path.as_ref().exists();
        let mut session = Self::open(path)?;
        if !existed {
            session.document.meta.project = default_project.to_string();
        }
        Ok(session)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn set_project(&mut self, project: &str) -> Result<()> {
        self.document.meta.project = project.to_string();
        store::save(&self.path, &self.document)
    }

    /// Upsert a node and persist. Validation failures leave both the store
    /// and the backing file unchanged.
    pub fn save_node(&mut self, node: Node) -> Result<()> {
        self.document.upsert_node(node)?;
        store::save(&self.path, &self.document)
    }

    /// Append an edge and persist.
    pub fn save_edge(&mut self, edge: Edge) -> Result<()> {
        self.document.add_edge(edge)?;
        store::save(&self.path, &self.document)
    }

    pub fn set_search(&mut self, text: &str) {
        self.search_text = text.to_string();
    }

    pub fn set_filter<I: IntoIterator<Item = String>>(&mut self, types: I) {
        self.selected_types = types.into_iter().collect();
    }

    /// Replace the store wholesale with an imported document and persist.
    /// A rejected import leaves the prior state untouched.
    pub fn import(&mut self, raw: &str) -> Result<()> {
        let imported = store::import(raw)?;
        log::info!(
            "Imported document: {} nodes, {} edges",
            imported.nodes.len(),
            imported.edges.len()
        );
        self.document = imported;
        store::save(&self.path, &self.document)
    }

    /// Serialize the current in-memory document, persisted or not.
    pub fn export(&self) -> Result<String> {
        store::export(&self.document)
    }

    /// Relation types available as filter choices, sorted.
    pub fn relation_types(&self) -> Vec<String> {
        query::distinct_relation_types(&self.document.edges)
    }

    /// Resolve the current search text to a node, first match wins.
    pub fn highlight(&self) -> Option<&Node> {
        query::find_by_name_or_alias(&self.document, &self.search_text)
    }

    fn allowed(&self) -> Option<&BTreeSet<String>> {
        if self.selected_types.is_empty() {
            None
        } else {
            Some(&self.selected_types)
        }
    }

    /// Run one full read cycle: rebuild the graph from the current
    /// snapshot, resolve the highlight, and project the scene plan.
    pub fn view(&self) -> Result<SessionView> {
        let graph = graph::build(&self.document)?;
        let highlight = self.highlight().map(|n| n.id.clone());
        let scene = render::scene_plan(&graph, highlight.as_deref(), self.allowed());
        let detail_edges = match &highlight {
            Some(id) => query::edges_for_node(&self.document, id, self.allowed())
                .into_iter()
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        Ok(SessionView {
            graph,
            highlight,
            scene,
            detail_edges,
        })
    }
}
