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

//! Initializer binding (§4.4): `VariableDeclaration::set_initializer` and its
//! specialized `typeChanged` override.

use std::collections::HashSet;

use log::debug;

use crate::{
    graph::Graph,
    ids::NodeId,
    nodes::NodeKind,
    propagation::{
        apply_new_type,
        register_type_listener,
        unregister_type_listener,
    },
    types::Type,
};

/// Replaces `v`'s initializer with `new_initializer` (§4.4's three ordered
/// steps). Passing `None` simply tears down the old wiring.
pub fn set_initializer(graph: &mut Graph, v: NodeId, new_initializer: Option<NodeId>) {
    let old_initializer = match &graph.node(v).kind {
        NodeKind::VariableDeclaration(decl) => decl.initializer,
        _ => {
            debug!("set_initializer called on a non-VariableDeclaration node {v:?}");
            return;
        }
    };

    // Step 1: tear down the prior initializer's wiring.
    if let Some(old) = old_initializer {
        graph.remove_dfg_edge(old, v);
        unregister_type_listener(graph, old, v);
        if is_construct_listener(graph, old) {
            unregister_type_listener(graph, v, old);
        }
    }

    // Step 2: install the new reference.
    if let NodeKind::VariableDeclaration(decl) = &mut graph.node_mut(v).kind {
        decl.initializer = new_initializer;
    }

    // Step 3: wire up the new initializer.
    if let Some(new) = new_initializer {
        graph.add_dfg_edge(new, v);
        register_type_listener(graph, new, v);
        if is_construct_listener(graph, new) {
            register_type_listener(graph, v, new);
        }
    }
}

/// Construct-expression-kind nodes (`New`, `Call` used as a constructor
/// call) are themselves listeners that want to hear back from the
/// declaration once its type firms up (§4.4 step 3's "if e is itself a
/// listener" clause).
fn is_construct_listener(graph: &Graph, id: NodeId) -> bool {
    matches!(graph.node(id).kind, NodeKind::New(_) | NodeKind::Call(_))
}

/// `VariableDeclaration`'s specialized `typeChanged` (§4.4). Called by the
/// propagation bus once the shared regression guard has already passed.
pub(crate) fn variable_declaration_type_changed(
    graph: &mut Graph,
    v: NodeId,
    src: NodeId,
    root: NodeId,
    src_propagation_type: Type,
    visiting: &mut HashSet<NodeId>,
) {
    let is_initializer_list = matches!(graph.node(src).kind, NodeKind::InitializerList(_));
    let decl = match &graph.node(v).kind {
        NodeKind::VariableDeclaration(decl) => decl.clone(),
        _ => return,
    };

    if Some(src) == decl.initializer && is_initializer_list {
        if decl.is_array {
            apply_new_type(graph, v, src_propagation_type, root, visiting);
            return;
        }
        let already_known = !decl.typed.declared_type().is_unknown();
        if already_known {
            // The list is building an object, not an array: v's type is
            // left alone.
            return;
        }
        let stripped = src_propagation_type.dereference();
        apply_new_type(graph, v, stripped, root, visiting);
        return;
    }

    apply_new_type(graph, v, src_propagation_type, root, visiting);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        location::Location,
        nodes::{
            expressions::{
                InitializerList,
                Literal,
            },
            Header,
            TypedState,
        },
        literal::IntegerValue,
        literal::LiteralValue,
        types::{
            PointerOrigin,
            Qualifiers,
            TypeRegistry,
        },
    };

    fn var_decl(graph: &mut Graph, is_array: bool) -> NodeId {
        graph.alloc(
            Header::new(Location::synthetic(), "v", "v"),
            NodeKind::VariableDeclaration(crate::nodes::VariableDeclaration {
                typed: TypedState::new(Type::unknown()),
                initializer: None,
                implicit_initializer_allowed: false,
                is_array,
            }),
        )
    }

    fn init_list(graph: &mut Graph, ty: Type) -> NodeId {
        graph.alloc(
            Header::new(Location::synthetic(), "{1,2}", "{1,2}"),
            NodeKind::InitializerList(InitializerList {
                typed: TypedState::new(ty),
                clauses: Vec::new(),
            }),
        )
    }

    #[test]
    fn setting_initializer_wires_dfg_and_listener() {
        let mut graph = Graph::new();
        let mut registry = TypeRegistry::new();
        let int_ty = registry.create_from("int", false, Qualifiers::NONE);
        let v = var_decl(&mut graph, false);
        let lit = graph.alloc(
            Header::new(Location::synthetic(), "1", "1"),
            NodeKind::Literal(Literal {
                typed: TypedState::new(int_ty),
                value: LiteralValue::Integer(IntegerValue::I32(1)),
            }),
        );

        set_initializer(&mut graph, v, Some(lit));
        assert!(graph.has_dfg_edge(lit, v));
        assert!(graph
            .node(lit)
            .kind
            .typed_state()
            .unwrap()
            .listeners()
            .contains(&v));

        set_initializer(&mut graph, v, None);
        assert!(!graph.has_dfg_edge(lit, v));
        assert!(!graph
            .node(lit)
            .kind
            .typed_state()
            .unwrap()
            .listeners()
            .contains(&v));
    }

    #[test]
    fn non_array_declaration_strips_array_layer_from_initializer_list() {
        let mut graph = Graph::new();
        let mut registry = TypeRegistry::new();
        let struct_ty = registry.create_from("A", false, Qualifiers::NONE);
        let array_ty = struct_ty.pointer_of(PointerOrigin::Array);

        let v = var_decl(&mut graph, false);
        let list = init_list(&mut graph, Type::unknown());
        set_initializer(&mut graph, v, Some(list));

        crate::propagation::set_type(&mut graph, list, array_ty);

        let v_type = graph
            .node(v)
            .kind
            .typed_state()
            .unwrap()
            .declared_type()
            .clone();
        assert_eq!(v_type, struct_ty);
    }

    #[test]
    fn array_declaration_keeps_initializer_list_type_as_is() {
        let mut graph = Graph::new();
        let mut registry = TypeRegistry::new();
        let elem_ty = registry.create_from("int", false, Qualifiers::NONE);
        let array_ty = elem_ty.pointer_of(PointerOrigin::Array);

        let v = var_decl(&mut graph, true);
        let list = init_list(&mut graph, Type::unknown());
        set_initializer(&mut graph, v, Some(list));

        crate::propagation::set_type(&mut graph, list, array_ty.clone());

        let v_type = graph
            .node(v)
            .kind
            .typed_state()
            .unwrap()
            .declared_type()
            .clone();
        assert_eq!(v_type, array_ty);
    }
}
