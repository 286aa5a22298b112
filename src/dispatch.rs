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

//! Expression dispatcher (§4.6): a match-based dispatch table from vendor
//! node shapes to lowering routines, generalizing the teacher's
//! demangling grammar dispatch (`demangler.rs`'s `read_` functions, one
//! per mangled-grammar production) to vendor-AST node shapes.

use log::error;

use crate::{
    binding,
    context::LoweringContext,
    errors::{
        Error,
        Result,
    },
    host::{
        LiteralKind,
        VendorDesignator,
        VendorNode,
        VendorShape,
    },
    ids::NodeId,
    literal,
    nodes::{
        self,
        ArrayRange,
        ArraySubscript,
        BinaryOp,
        BinaryOpKind,
        Call,
        Cast,
        CastKind,
        CompoundStatementExpr,
        ConditionalExpr,
        DeclaredReference,
        DesignatedInitializer,
        Designator,
        Delete,
        ExpressionList,
        ForStatement,
        Header,
        InitializerList,
        MemberCall,
        MemberExpr,
        New,
        NodeKind,
        TypeIdExpr,
        TypeIdOperator,
        TypedState,
        UnaryOp,
        UnaryOpKind,
        VariableDeclaration,
    },
    types::{
        Qualifiers,
        Type,
    },
};

/// Lowers a single vendor node, recursively lowering and wiring its
/// children as needed. The one entry point every handler below is reached
/// through.
pub fn lower(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> Result<NodeId> {
    match vendor.shape() {
        VendorShape::Parenthesized => {
            // Bracketed-primary transparency (§4.6, testable property 7):
            // no node is allocated for the parens themselves.
            let children = vendor.children();
            lower(ctx, children[0])
        }
        VendorShape::Literal(kind) => lower_literal(ctx, vendor, kind),
        VendorShape::Unary { op, prefix } => lower_unary(ctx, vendor, op, prefix),
        VendorShape::Binary { op } => lower_binary(ctx, vendor, op),
        VendorShape::Conditional => lower_conditional(ctx, vendor),
        VendorShape::Cast { operator_kind } => lower_cast(ctx, vendor, operator_kind),
        VendorShape::Call => lower_call(ctx, vendor),
        VendorShape::New => lower_new(ctx, vendor),
        VendorShape::Delete => lower_delete(ctx, vendor),
        VendorShape::InitializerList => lower_initializer_list(ctx, vendor),
        VendorShape::DesignatedInitializer { designators } => {
            lower_designated_initializer(ctx, vendor, &designators)
        }
        VendorShape::ArrayRange => lower_array_range(ctx, vendor),
        VendorShape::ExpressionList => lower_expression_list(ctx, vendor),
        VendorShape::CompoundStatementExpr => lower_compound_statement_expr(ctx, vendor),
        VendorShape::TypeIdExpr { operator } => lower_type_id_expr(ctx, vendor, operator),
        VendorShape::DeclaredReference => lower_declared_reference(ctx, vendor),
        VendorShape::ArraySubscript => lower_array_subscript(ctx, vendor),
        VendorShape::MemberExpr => lower_member_expr(ctx, vendor),
        VendorShape::VariableDeclaration {
            is_array,
            implicit_initializer_allowed,
        } => lower_variable_declaration(ctx, vendor, is_array, implicit_initializer_allowed),
        VendorShape::ForStatement => lower_for_statement(ctx, vendor),
        VendorShape::Empty => unreachable!("an Empty slot must be checked before recursing into it"),
        VendorShape::Unrecognized => Ok(lower_unrecognized(ctx, vendor)),
    }
}

fn header(vendor: &dyn VendorNode) -> Header {
    Header::new(vendor.location(), vendor.code(), vendor.name())
}

fn declared_type(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> Type {
    ctx.types.create_from(vendor.declared_type_spelling(), true, Qualifiers::NONE)
}

fn lower_literal(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode, kind: LiteralKind) -> Result<NodeId> {
    let location = vendor.location();
    let (value, ty) = match kind {
        LiteralKind::Integer => {
            let (int_value, ty) = literal::lower_integer_literal(&mut ctx.types, vendor.code(), &location);
            (literal::LiteralValue::Integer(int_value), ty)
        }
        LiteralKind::Floating { single_precision } => {
            let value = vendor.code().trim().parse::<f64>().unwrap_or_else(|_| {
                ctx.log_debug(&location, &format!("unparseable floating literal {:?}", vendor.code()));
                0.0
            });
            let ty = literal::lower_floating_type(&mut ctx.types, single_precision);
            (literal::LiteralValue::Floating { value, single_precision }, ty)
        }
        LiteralKind::Bool => {
            let truthy = matches!(vendor.code().trim(), "1" | "true");
            (literal::LiteralValue::Bool(truthy), literal::lower_bool_type(&mut ctx.types))
        }
        LiteralKind::Char => {
            let codepoint = vendor.code().trim().parse::<u32>().unwrap_or(0);
            (literal::LiteralValue::Char(codepoint), literal::lower_char_type(&mut ctx.types))
        }
        LiteralKind::Str => {
            let ty = declared_type(ctx, vendor);
            (literal::LiteralValue::Str(vendor.code().to_string()), ty)
        }
        LiteralKind::Other => {
            let ty = declared_type(ctx, vendor);
            (literal::LiteralValue::Other(vendor.code().to_string()), ty)
        }
    };
    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::Literal(nodes::Literal {
            typed: TypedState::new(ty),
            value,
        }),
    );
    Ok(id)
}

fn lower_unary(
    ctx: &mut LoweringContext<'_>,
    vendor: &dyn VendorNode,
    op: UnaryOpKind,
    prefix: bool,
) -> Result<NodeId> {
    let children = vendor.children();
    let operand = lower(ctx, children[0])?;
    let ty = declared_type(ctx, vendor);
    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::UnaryOp(UnaryOp {
            typed: TypedState::new(ty),
            op,
            prefix,
            operand,
        }),
    );
    ctx.graph.attach_child(id, operand);
    Ok(id)
}

fn lower_binary(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode, op: BinaryOpKind) -> Result<NodeId> {
    let children = vendor.children();
    let lhs = lower(ctx, children[0])?;
    let rhs = lower(ctx, children[1])?;
    let ty = declared_type(ctx, vendor);
    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::BinaryOp(BinaryOp {
            typed: TypedState::new(ty),
            op,
            lhs,
            rhs,
        }),
    );
    ctx.graph.attach_child(id, lhs);
    ctx.graph.attach_child(id, rhs);
    Ok(id)
}

fn lower_conditional(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> Result<NodeId> {
    let children = vendor.children();
    let condition = lower(ctx, children[0])?;
    let (then_branch, else_branch) = if children.len() >= 3 {
        (lower(ctx, children[1])?, lower(ctx, children[2])?)
    } else {
        // GNU `?:` shortcut: the missing "then" reuses the condition.
        (condition, lower(ctx, children[1])?)
    };
    let ty = declared_type(ctx, vendor);
    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::ConditionalExpr(ConditionalExpr {
            typed: TypedState::new(ty),
            condition,
            then_branch,
            else_branch,
        }),
    );
    ctx.graph.attach_child(id, condition);
    if then_branch != condition {
        ctx.graph.attach_child(id, then_branch);
    }
    ctx.graph.attach_child(id, else_branch);
    Ok(id)
}

fn lower_cast(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode, operator_kind: CastKind) -> Result<NodeId> {
    let children = vendor.children();
    let operand = lower(ctx, children[0])?;

    // The distilled policy of pointer-to-problem vs. pointer-to-known-type
    // vs. bare-problem fallback needs a structured vendor type the
    // `declared_type_spelling: &str` contract doesn't carry; the type
    // registry's own non-fatal parse already turns an unresolvable
    // spelling into `Unknown` (§4.7 condition 2), which is the
    // behavior-preserving subset of that policy this core implements (see
    // DESIGN.md).
    let target_type = declared_type(ctx, vendor);
    if target_type.is_unknown() {
        ctx.log_debug(&vendor.location(), &format!("cast target {:?} did not resolve", vendor.declared_type_spelling()));
    }

    let fixed_at_target = target_type.is_primitive() || matches!(operator_kind, CastKind::CStyle);
    let initial_type = if fixed_at_target { target_type.clone() } else { Type::unknown() };

    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::Cast(Cast {
            typed: TypedState::new(initial_type),
            target_type,
            operand,
            operator_kind,
        }),
    );
    ctx.graph.attach_child(id, operand);
    if !fixed_at_target {
        crate::propagation::register_type_listener(&mut ctx.graph, operand, id);
    }
    Ok(id)
}

fn lower_call(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> Result<NodeId> {
    let children = vendor.children();
    let callee_vendor = children[0];
    let callee_id = lower(ctx, callee_vendor)?;

    // Extract the callee shape's relevant ids up front so the subsequent
    // allocation doesn't need to hold a borrow of `callee_id`'s node. The
    // callee node itself is never attached anywhere after this: it stays
    // an unreferenced arena entry, which is what "disconnected... so it
    // does not appear as a stray child" means once nodes can't be
    // physically removed from a stable-index arena.
    enum CalleeShape {
        Member { base: NodeId, member: NodeId },
        Deref { member: NodeId },
        Free,
    }
    let callee_shape = match &ctx.graph.node(callee_id).kind {
        NodeKind::MemberExpr(me) => CalleeShape::Member { base: me.base, member: me.member },
        NodeKind::BinaryOp(bin) if bin.op == BinaryOpKind::Dot => {
            CalleeShape::Member { base: bin.lhs, member: bin.rhs }
        }
        NodeKind::UnaryOp(unary) if unary.op == UnaryOpKind::Deref => {
            CalleeShape::Deref { member: unary.operand }
        }
        _ => CalleeShape::Free,
    };

    let header = header(vendor);
    let id = match callee_shape {
        CalleeShape::Member { base, member } => {
            let fqn = member_call_fqn(ctx, base, member);
            ctx.graph.alloc(
                header,
                NodeKind::MemberCall(MemberCall {
                    typed: TypedState::new(Type::unknown()),
                    base: Some(base),
                    member,
                    fully_qualified_name: fqn,
                    arguments: Vec::new(),
                }),
            )
        }
        CalleeShape::Deref { member } => {
            let fqn = member_name(&ctx.graph, member);
            ctx.graph.alloc(
                header,
                NodeKind::MemberCall(MemberCall {
                    typed: TypedState::new(Type::unknown()),
                    base: None,
                    member,
                    fully_qualified_name: fqn,
                    arguments: Vec::new(),
                }),
            )
        }
        CalleeShape::Free => {
            let raw_callee = callee_vendor.code();
            let fqn = raw_callee.replace("::", ".");
            let name = raw_callee.rsplit("::").next().unwrap_or(raw_callee).to_string();
            ctx.graph.alloc(
                header,
                NodeKind::Call(Call {
                    typed: TypedState::new(Type::unknown()),
                    callee_name: name,
                    fully_qualified_name: fqn,
                    arguments: Vec::new(),
                }),
            )
        }
    };

    let mut arguments = Vec::with_capacity(children.len().saturating_sub(1));
    for arg_vendor in &children[1..] {
        let arg_id = lower(ctx, *arg_vendor)?;
        ctx.graph.attach_child(id, arg_id);
        arguments.push(arg_id);
    }
    let member_call_ends = match &ctx.graph.node(id).kind {
        NodeKind::Call(_) => None,
        NodeKind::MemberCall(call) => Some((call.base, call.member)),
        _ => unreachable!(),
    };
    if let Some((base, member)) = member_call_ends {
        if let Some(base) = base {
            ctx.graph.attach_child(id, base);
        }
        ctx.graph.attach_child(id, member);
    }
    match &mut ctx.graph.node_mut(id).kind {
        NodeKind::Call(call) => call.arguments = arguments,
        NodeKind::MemberCall(call) => call.arguments = arguments,
        _ => unreachable!(),
    }

    let ty = declared_type(ctx, vendor);
    if let Some(state) = ctx.graph.node_mut(id).kind.typed_state_mut() {
        state.set_declared_type(ty);
    }
    Ok(id)
}

fn member_name(graph: &crate::graph::Graph, member: NodeId) -> String {
    if let NodeKind::DeclaredReference(DeclaredReference { identifier, .. }) = &graph.node(member).kind {
        identifier.clone()
    } else {
        graph.node(member).header.name.clone()
    }
}

fn member_call_fqn(ctx: &LoweringContext<'_>, base: NodeId, member: NodeId) -> String {
    let base_type_name = ctx
        .graph
        .node(base)
        .kind
        .typed_state()
        .map(|s| s.declared_type().name().to_string())
        .unwrap_or_default();
    format!("{base_type_name}.{}", member_name(&ctx.graph, member))
}

fn lower_new(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> Result<NodeId> {
    let spelling = vendor.declared_type_spelling();
    let resolved_spelling = ctx
        .binding_resolver
        .resolve(spelling)
        .map(|decl| ctx.graph.node(decl).header.name.clone())
        .unwrap_or_else(|| spelling.to_string());
    let base = ctx.types.create_from(&resolved_spelling, true, Qualifiers::NONE);
    let allocated_type = base.pointer_of(crate::types::PointerOrigin::Array);

    let children = vendor.children();
    let initializer = match children.first() {
        Some(init_vendor) => Some(lower(ctx, *init_vendor)?),
        None => None,
    };

    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::New(New {
            typed: TypedState::new(allocated_type),
            initializer,
        }),
    );
    if let Some(init) = initializer {
        ctx.graph.attach_child(id, init);
    }
    Ok(id)
}

fn lower_delete(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> Result<NodeId> {
    let children = vendor.children();
    let operand = lower(ctx, children[0])?;
    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::Delete(Delete {
            typed: TypedState::new(Type::unknown()),
            operand,
        }),
    );
    ctx.graph.attach_child(id, operand);
    Ok(id)
}

fn lower_initializer_list(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> Result<NodeId> {
    let ty = declared_type(ctx, vendor);
    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::InitializerList(InitializerList {
            typed: TypedState::new(ty),
            clauses: Vec::new(),
        }),
    );
    let mut clauses = Vec::new();
    for child in vendor.children() {
        let clause = lower(ctx, child)?;
        ctx.graph.attach_child(id, clause);
        clauses.push(clause);
    }
    if let NodeKind::InitializerList(list) = &mut ctx.graph.node_mut(id).kind {
        list.clauses = clauses;
    }
    Ok(id)
}

fn lower_designated_initializer(
    ctx: &mut LoweringContext<'_>,
    vendor: &dyn VendorNode,
    vendor_designators: &[VendorDesignator],
) -> Result<NodeId> {
    if vendor_designators.is_empty() {
        return Err(Error::EmptyDesignatorList);
    }
    let children = vendor.children();
    let rhs_vendor = *children.last().expect("designated initializer must have an rhs child");
    let rhs = lower(ctx, rhs_vendor)?;

    let mut designators = Vec::with_capacity(vendor_designators.len());
    let mut to_attach = Vec::new();
    for designator in vendor_designators {
        match designator {
            VendorDesignator::Index(child_idx) => {
                let node = lower(ctx, children[*child_idx])?;
                to_attach.push(node);
                designators.push(Designator::Index(node));
            }
            VendorDesignator::Field(name) => {
                let field_ref = ctx.graph.alloc(
                    Header::new(vendor.location(), name.clone(), name.clone()),
                    NodeKind::DeclaredReference(DeclaredReference {
                        typed: TypedState::new(Type::unknown()),
                        identifier: name.clone(),
                        refers_to: None,
                    }),
                );
                to_attach.push(field_ref);
                designators.push(Designator::Field(field_ref));
            }
            VendorDesignator::Range(floor_idx, ceiling_idx) => {
                let floor = lower(ctx, children[*floor_idx])?;
                let ceiling = lower(ctx, children[*ceiling_idx])?;
                let range_id = ctx.graph.alloc(
                    header(vendor),
                    NodeKind::ArrayRange(ArrayRange {
                        typed: TypedState::new(Type::unknown()),
                        floor,
                        ceiling,
                    }),
                );
                ctx.graph.attach_child(range_id, floor);
                ctx.graph.attach_child(range_id, ceiling);
                to_attach.push(range_id);
                designators.push(Designator::Range(range_id));
            }
        }
    }

    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::DesignatedInitializer(DesignatedInitializer {
            typed: TypedState::new(Type::unknown()),
            designators,
            rhs,
        }),
    );
    for node in to_attach {
        ctx.graph.attach_child(id, node);
    }
    ctx.graph.attach_child(id, rhs);
    Ok(id)
}

fn lower_array_range(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> Result<NodeId> {
    let children = vendor.children();
    let floor = lower(ctx, children[0])?;
    let ceiling = lower(ctx, children[1])?;
    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::ArrayRange(ArrayRange {
            typed: TypedState::new(Type::unknown()),
            floor,
            ceiling,
        }),
    );
    ctx.graph.attach_child(id, floor);
    ctx.graph.attach_child(id, ceiling);
    Ok(id)
}

fn lower_expression_list(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> Result<NodeId> {
    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::ExpressionList(ExpressionList {
            typed: TypedState::new(Type::unknown()),
            expressions: Vec::new(),
        }),
    );
    let mut expressions = Vec::new();
    for child in vendor.children() {
        let expr = lower(ctx, child)?;
        ctx.graph.attach_child(id, expr);
        expressions.push(expr);
    }
    if let NodeKind::ExpressionList(list) = &mut ctx.graph.node_mut(id).kind {
        list.expressions = expressions;
    }
    Ok(id)
}

fn lower_compound_statement_expr(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> Result<NodeId> {
    let children = vendor.children();
    let body = lower(ctx, children[0])?;
    let ty = declared_type(ctx, vendor);
    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::CompoundStatementExpr(CompoundStatementExpr {
            typed: TypedState::new(ty),
            body,
        }),
    );
    ctx.graph.attach_child(id, body);
    Ok(id)
}

fn lower_type_id_expr(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode, operator: TypeIdOperator) -> Result<NodeId> {
    let probed_type = declared_type(ctx, vendor);
    let result_type = match operator {
        TypeIdOperator::SizeOf | TypeIdOperator::AlignOf => {
            ctx.types.create_from("std::size_t", true, Qualifiers::NONE)
        }
        TypeIdOperator::TypeId => ctx.types.create_from("const std::type_info&", false, Qualifiers::NONE),
        TypeIdOperator::TypeOf => Type::unknown(),
    };
    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::TypeIdExpr(TypeIdExpr {
            typed: TypedState::new(result_type),
            operator,
            probed_type,
        }),
    );
    Ok(id)
}

fn lower_declared_reference(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> Result<NodeId> {
    let identifier = vendor.name().to_string();
    let refers_to = ctx.binding_resolver.resolve(&identifier);
    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::DeclaredReference(DeclaredReference {
            typed: TypedState::new(Type::unknown()),
            identifier,
            refers_to,
        }),
    );
    Ok(id)
}

fn lower_array_subscript(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> Result<NodeId> {
    let children = vendor.children();
    let array = lower(ctx, children[0])?;
    let index = lower(ctx, children[1])?;
    let ty = declared_type(ctx, vendor);
    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::ArraySubscript(ArraySubscript {
            typed: TypedState::new(ty),
            array,
            index,
        }),
    );
    ctx.graph.attach_child(id, array);
    ctx.graph.attach_child(id, index);
    Ok(id)
}

fn lower_member_expr(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> Result<NodeId> {
    let children = vendor.children();
    let base = lower(ctx, children[0])?;
    let member = lower(ctx, children[1])?;
    let ty = declared_type(ctx, vendor);
    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::MemberExpr(MemberExpr {
            typed: TypedState::new(ty),
            base,
            member,
        }),
    );
    ctx.graph.attach_child(id, base);
    ctx.graph.attach_child(id, member);
    Ok(id)
}

fn lower_variable_declaration(
    ctx: &mut LoweringContext<'_>,
    vendor: &dyn VendorNode,
    is_array: bool,
    implicit_initializer_allowed: bool,
) -> Result<NodeId> {
    let ty = declared_type(ctx, vendor);
    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::VariableDeclaration(VariableDeclaration {
            typed: TypedState::new(ty),
            initializer: None,
            implicit_initializer_allowed,
            is_array,
        }),
    );

    let children = vendor.children();
    if let Some(init_vendor) = children.first() {
        let init_id = lower(ctx, *init_vendor)?;
        ctx.graph.attach_child(id, init_id);
        binding::set_initializer(&mut ctx.graph, id, Some(init_id));
    }
    Ok(id)
}

fn lower_for_statement(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> Result<NodeId> {
    let children = vendor.children();
    debug_assert_eq!(children.len(), 5, "ForStatement must supply exactly five slots");

    let mut slots = [None; 5];
    for (index, child) in children.iter().enumerate().take(5) {
        if !matches!(child.shape(), VendorShape::Empty) {
            let lowered = lower(ctx, *child)?;
            slots[index] = Some(lowered);
        }
    }

    let id = ctx.graph.alloc(
        header(vendor),
        NodeKind::ForStatement(ForStatement {
            initializer_statement: slots[0],
            condition_declaration: slots[1],
            condition_expression: slots[2],
            iteration_expression: slots[3],
            body: slots[4],
        }),
    );
    for slot in slots.into_iter().flatten() {
        ctx.graph.attach_child(id, slot);
    }
    Ok(id)
}

fn lower_unrecognized(ctx: &mut LoweringContext<'_>, vendor: &dyn VendorNode) -> NodeId {
    error!("{}: unrecognized vendor node class, lowering as Generic", vendor.location());
    ctx.graph.alloc(header(vendor), NodeKind::Generic)
}
