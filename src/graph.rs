// Copyright 2024 Ryan McKenzie
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//    http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The arena-backed graph: AST containment, DFG edges, and REFERS_TO
//! cross-references (§3), addressed by [`NodeId`].
//!
//! Generalizes the teacher's `NodeCache` (`cache.rs`) — a bump-allocated,
//! per-kind `Vec` storage addressed by `NodeHandle<T>` — into a single
//! `Vec<NodeEntry>` arena, since this frontend mutates node state in place
//! as the propagation bus (§4.3) runs, which a bump allocator's one-shot
//! `&mut` handles do not comfortably support once ownership has moved into
//! shared graph structure.

use std::collections::HashSet;

use crate::{
    errors::{
        Error,
        Result,
    },
    ids::NodeId,
    nodes::{
        expressions::DeclaredReference,
        Header,
        NodeKind,
    },
};

pub struct NodeEntry {
    pub header: Header,
    pub kind: NodeKind,
    children: Vec<NodeId>,
}

#[derive(Default)]
pub struct Graph {
    nodes: Vec<NodeEntry>,
    dfg_edges: HashSet<(NodeId, NodeId)>,
    root: Option<NodeId>,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocates a new arena entry. Factories (§4.2) call this and nothing
    /// else — no edges are established here.
    pub fn alloc(&mut self, header: Header, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(NodeEntry {
            header,
            kind,
            children: Vec::new(),
        });
        id
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &NodeEntry {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut NodeEntry {
        &mut self.nodes[id.index()]
    }

    pub fn try_node(&self, id: NodeId) -> Result<&NodeEntry> {
        self.nodes.get(id.index()).ok_or(Error::UnknownNode(id))
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
    }

    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Establishes an AST containment edge. Overwrites any previous parent
    /// of `child` — invariant 1 of §3 holds by construction since `parent`
    /// is a single `Option<NodeId>` field, never a set.
    pub fn attach_child(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(child).header.parent = Some(parent);
        let siblings = &mut self.node_mut(parent).children;
        if !siblings.contains(&child) {
            siblings.push(child);
        }
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).header.parent
    }

    pub fn add_dfg_edge(&mut self, from: NodeId, to: NodeId) {
        self.dfg_edges.insert((from, to));
    }

    pub fn remove_dfg_edge(&mut self, from: NodeId, to: NodeId) {
        self.dfg_edges.remove(&(from, to));
    }

    #[must_use]
    pub fn has_dfg_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.dfg_edges.contains(&(from, to))
    }

    pub fn dfg_edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.dfg_edges.iter().copied()
    }

    /// REFERS_TO edges are derived on demand from every `DeclaredReference`
    /// that was resolved, rather than duplicated into a side table.
    pub fn refers_to_edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(index, entry)| {
            if let NodeKind::DeclaredReference(DeclaredReference { refers_to: Some(decl), .. }) =
                &entry.kind
            {
                Some((NodeId::from_index(index), *decl))
            } else {
                None
            }
        })
    }

    /// Testable property 1 (§8): the AST edges form a forest. Walks each
    /// node's parent chain bounded by the arena size to detect a cycle.
    #[must_use]
    pub fn ast_is_forest(&self) -> bool {
        for start in 0..self.nodes.len() {
            let mut current = NodeId::from_index(start);
            let mut steps = 0;
            while let Some(parent) = self.parent(current) {
                current = parent;
                steps += 1;
                if steps > self.nodes.len() {
                    return false;
                }
            }
        }
        true
    }
}
