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

//! The common state every typed node carries (§3 "Typed node"), and the
//! header every graph node carries regardless of whether it is typed.
//!
//! The teacher's deep `Node -> Declaration -> ValueDeclaration ->
//! VariableDeclaration` inheritance chain (its C++ ancestor's shape) is
//! replaced per the design notes (§9) with a flat header plus a
//! variant-specific payload — [`Header`] is that common header, and
//! [`TypedState`] is the payload every expression and value-declaration
//! embeds.

use crate::{
    ids::NodeId,
    location::Location,
    types::Type,
};

/// Fields every arena entry carries: identity is the arena index itself,
/// so `Header` only needs location, raw code, name, and AST parent.
#[derive(Debug, Clone)]
pub struct Header {
    pub location: Location,
    pub code: String,
    pub name: String,
    pub parent: Option<NodeId>,
}

impl Header {
    #[must_use]
    pub fn new(location: Location, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            location,
            code: code.into(),
            name: name.into(),
            parent: None,
        }
    }
}

/// T, S, and the listener set of a typed node (§3, §4.3).
#[derive(Debug, Clone)]
pub struct TypedState {
    declared_type: Type,
    possible_subtypes: Vec<Type>,
    /// Subscribers: nodes that asked to be notified when *this* node's type
    /// changes (`registerTypeListener` was called on this node).
    listeners: Vec<NodeId>,
}

impl TypedState {
    #[must_use]
    pub fn new(declared_type: Type) -> Self {
        Self {
            declared_type,
            possible_subtypes: Vec::new(),
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn declared_type(&self) -> &Type {
        &self.declared_type
    }

    pub fn set_declared_type(&mut self, ty: Type) {
        self.declared_type = ty;
    }

    #[must_use]
    pub fn possible_subtypes(&self) -> &[Type] {
        &self.possible_subtypes
    }

    pub fn set_possible_subtypes(&mut self, subtypes: Vec<Type>) {
        self.possible_subtypes = subtypes;
    }

    #[must_use]
    pub fn listeners(&self) -> &[NodeId] {
        &self.listeners
    }

    pub fn add_listener(&mut self, listener: NodeId) {
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
    }

    pub fn remove_listener(&mut self, listener: NodeId) {
        self.listeners.retain(|id| *id != listener);
    }
}
