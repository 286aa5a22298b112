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

//! Lowering context & configuration (§4.8): the per-translation-unit owner
//! of the arena, the type registry, and the collaborator trait objects,
//! generalizing the teacher's per-call `Bump` + `NodeCache` pairing into a
//! long-lived object the dispatcher is driven through.

use log::Level;

use crate::{
    dispatch,
    errors::{
        Error,
        Result,
    },
    graph::Graph,
    host::{
        BindingResolver,
        ScopeResolver,
        VendorNode,
    },
    ids::NodeId,
    location::Location,
    log_util::log_at,
    types::TypeRegistry,
};

/// Owns everything one translation unit's lowering needs (§4.8). There is
/// no file I/O, CLI parsing, or environment access here — "configuration"
/// is limited to which collaborators the host installs.
pub struct LoweringContext<'a> {
    pub graph: Graph,
    pub types: TypeRegistry,
    pub binding_resolver: &'a dyn BindingResolver,
    pub scope_resolver: &'a dyn ScopeResolver,
}

impl<'a> LoweringContext<'a> {
    #[must_use]
    pub fn new(binding_resolver: &'a dyn BindingResolver, scope_resolver: &'a dyn ScopeResolver) -> Self {
        Self {
            graph: Graph::new(),
            types: TypeRegistry::new(),
            binding_resolver,
            scope_resolver,
        }
    }

    pub fn log_error(&self, location: &Location, message: &str) {
        log_at(Level::Error, location, message);
    }

    pub fn log_warn(&self, location: &Location, message: &str) {
        log_at(Level::Warn, location, message);
    }

    pub fn log_debug(&self, location: &Location, message: &str) {
        log_at(Level::Debug, location, message);
    }
}

/// The exposed interface (§6): lowers one vendor translation unit and
/// returns its root node id. The full node table is `ctx.graph` once this
/// returns.
pub fn lower_translation_unit(ctx: &mut LoweringContext<'_>, root: &dyn VendorNode) -> Result<NodeId> {
    let id = dispatch::lower(ctx, root)?;
    ctx.graph.set_root(id);
    ctx.graph.try_node(id).map_err(|_| Error::MissingRoot)?;
    Ok(id)
}
