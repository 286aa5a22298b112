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

//! Expression node payloads (§3). Every variant embeds a [`TypedState`]
//! since every expression is typed.

use crate::{
    ids::NodeId,
    literal::LiteralValue,
    nodes::{
        enums::{
            BinaryOpKind,
            CastKind,
            TypeIdOperator,
            UnaryOpKind,
        },
        typed::TypedState,
    },
    types::Type,
};

#[derive(Debug, Clone)]
pub struct Literal {
    pub typed: TypedState,
    pub value: LiteralValue,
}

#[derive(Debug, Clone)]
pub struct UnaryOp {
    pub typed: TypedState,
    pub op: UnaryOpKind,
    pub prefix: bool,
    pub operand: NodeId,
}

#[derive(Debug, Clone)]
pub struct BinaryOp {
    pub typed: TypedState,
    pub op: BinaryOpKind,
    pub lhs: NodeId,
    pub rhs: NodeId,
}

#[derive(Debug, Clone)]
pub struct ConditionalExpr {
    pub typed: TypedState,
    pub condition: NodeId,
    pub then_branch: NodeId,
    pub else_branch: NodeId,
}

#[derive(Debug, Clone)]
pub struct Cast {
    pub typed: TypedState,
    /// The cast's declared target, independent of `typed.declared_type`:
    /// this is what `propagation_type` (§4.3) advertises to subscribers,
    /// even while the cast's own T is still being refined by its operand.
    pub target_type: Type,
    pub operand: NodeId,
    pub operator_kind: CastKind,
}

#[derive(Debug, Clone)]
pub struct Call {
    pub typed: TypedState,
    pub callee_name: String,
    pub fully_qualified_name: String,
    pub arguments: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct MemberCall {
    pub typed: TypedState,
    pub base: Option<NodeId>,
    pub member: NodeId,
    pub fully_qualified_name: String,
    pub arguments: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct MemberExpr {
    pub typed: TypedState,
    pub base: NodeId,
    pub member: NodeId,
}

#[derive(Debug, Clone)]
pub struct DeclaredReference {
    pub typed: TypedState,
    pub identifier: String,
    /// Populated by the binding resolver (§6) when the name could be
    /// resolved to a prior declaration; establishes the REFERS_TO edge.
    pub refers_to: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct ArraySubscript {
    pub typed: TypedState,
    pub array: NodeId,
    pub index: NodeId,
}

#[derive(Debug, Clone)]
pub struct New {
    pub typed: TypedState,
    pub initializer: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Delete {
    pub typed: TypedState,
    pub operand: NodeId,
}

#[derive(Debug, Clone)]
pub struct InitializerList {
    pub typed: TypedState,
    pub clauses: Vec<NodeId>,
}

/// One designator in a `DesignatedInitializer` (§4.6): array subscript,
/// field, or array range, each lowered to a single LHS expression.
#[derive(Debug, Clone)]
pub enum Designator {
    Index(NodeId),
    Field(NodeId),
    Range(NodeId),
}

#[derive(Debug, Clone)]
pub struct DesignatedInitializer {
    pub typed: TypedState,
    pub designators: Vec<Designator>,
    pub rhs: NodeId,
}

#[derive(Debug, Clone)]
pub struct ArrayRange {
    pub typed: TypedState,
    pub floor: NodeId,
    pub ceiling: NodeId,
}

#[derive(Debug, Clone)]
pub struct ExpressionList {
    pub typed: TypedState,
    pub expressions: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct CompoundStatementExpr {
    pub typed: TypedState,
    pub body: NodeId,
}

#[derive(Debug, Clone)]
pub struct TypeIdExpr {
    pub typed: TypedState,
    pub operator: TypeIdOperator,
    pub probed_type: Type,
}
