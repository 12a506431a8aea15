use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

pub type NodeId = u64;

/// Where a node is attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Parent {
    Body,
    Container(String),
}

/// A detached visual node: a class list, inline CSS and optional text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    pub class: String,
    pub style: String,
    pub text: Option<String>,
}

/// Display surface the effects draw on. Implementations must be callable
/// from timer tasks, hence `Send + Sync`.
pub trait Surface: Send + Sync {
    fn has_container(&self, id: &str) -> bool;
    fn create_element(&self, element: Element) -> NodeId;
    fn append(&self, parent: Parent, node: NodeId);
    fn remove(&self, node: NodeId);
    fn has_style(&self, id: &str) -> bool;
    fn insert_style(&self, id: &str, css: &str);
}

#[derive(Debug, Clone, Serialize)]
pub struct AttachedNode {
    pub id: NodeId,
    pub parent: Parent,
    #[serde(flatten)]
    pub element: Element,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurfaceSnapshot {
    pub nodes: Vec<AttachedNode>,
    pub styles: Vec<String>,
}

#[derive(Debug, Default)]
struct SurfaceState {
    next_id: NodeId,
    containers: HashSet<String>,
    elements: HashMap<NodeId, Element>,
    attached: BTreeMap<NodeId, Parent>,
    styles: BTreeMap<String, String>,
}

/// Surface kept entirely in memory; a front end can poll `snapshot()`.
#[derive(Debug, Default)]
pub struct InMemorySurface {
    state: Mutex<SurfaceState>,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(self, id: &str) -> Self {
        self.lock().containers.insert(id.to_string());
        self
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> SurfaceSnapshot {
        let state = self.lock();
        let nodes = state
            .attached
            .iter()
            .filter_map(|(id, parent)| {
                state.elements.get(id).map(|element| AttachedNode {
                    id: *id,
                    parent: parent.clone(),
                    element: element.clone(),
                })
            })
            .collect();

        SurfaceSnapshot {
            nodes,
            styles: state.styles.keys().cloned().collect(),
        }
    }

    /// Number of attached nodes whose class list contains `class`.
    pub fn count_with_class(&self, class: &str) -> usize {
        let state = self.lock();
        state
            .attached
            .keys()
            .filter_map(|id| state.elements.get(id))
            .filter(|element| element.class.split_whitespace().any(|c| c == class))
            .count()
    }

    pub fn style_css(&self, id: &str) -> Option<String> {
        self.lock().styles.get(id).cloned()
    }
}

impl Surface for InMemorySurface {
    fn has_container(&self, id: &str) -> bool {
        self.lock().containers.contains(id)
    }

    fn create_element(&self, element: Element) -> NodeId {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        state.elements.insert(id, element);
        id
    }

    fn append(&self, parent: Parent, node: NodeId) {
        let mut state = self.lock();
        if let Parent::Container(ref container) = parent {
            if !state.containers.contains(container) {
                warn!("Cannot attach node {} to missing container '{}'", node, container);
                return;
            }
        }
        if state.elements.contains_key(&node) {
            state.attached.insert(node, parent);
        }
    }

    fn remove(&self, node: NodeId) {
        let mut state = self.lock();
        state.attached.remove(&node);
        if state.elements.remove(&node).is_some() {
            debug!("Removed node {}", node);
        }
    }

    fn has_style(&self, id: &str) -> bool {
        self.lock().styles.contains_key(id)
    }

    fn insert_style(&self, id: &str, css: &str) {
        self.lock().styles.insert(id.to_string(), css.to_string());
    }
}
