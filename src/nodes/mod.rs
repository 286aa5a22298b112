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

//! Graph-node factory (§4.2): the tagged-union node payloads and the
//! pure constructors that allocate them with a default `Unknown` type.
//! Mirrors the teacher's `nodes/` split (`derived.rs` for concrete node
//! structs, `enums.rs` for small closed vocabularies, an
//! intermediate/typed layer for the shared machinery) but flattened from
//! its inheritance hierarchy into the tagged `NodeKind` enum the design
//! notes (§9) call for.

pub mod declarations;
pub mod enums;
pub mod expressions;
pub mod typed;

pub use declarations::{
    ForStatement,
    VariableDeclaration,
};
pub use enums::{
    BinaryOpKind,
    CastKind,
    TypeIdOperator,
    UnaryOpKind,
};
pub use expressions::{
    ArrayRange,
    ArraySubscript,
    BinaryOp,
    Call,
    Cast,
    CompoundStatementExpr,
    ConditionalExpr,
    DeclaredReference,
    Delete,
    DesignatedInitializer,
    Designator,
    ExpressionList,
    InitializerList,
    Literal,
    MemberCall,
    MemberExpr,
    New,
    TypeIdExpr,
    UnaryOp,
};
pub use typed::{
    Header,
    TypedState,
};

/// The tagged union every arena entry's payload is drawn from. Factories
/// (component 4.2) never themselves establish AST/DFG/listener edges —
/// wiring is always the caller's responsibility (§4.2), which is why every
/// constructor below takes only the data needed to build the node's own
/// fields.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Literal(Literal),
    UnaryOp(UnaryOp),
    BinaryOp(BinaryOp),
    ConditionalExpr(ConditionalExpr),
    Cast(Cast),
    Call(Call),
    MemberCall(MemberCall),
    MemberExpr(MemberExpr),
    DeclaredReference(DeclaredReference),
    ArraySubscript(ArraySubscript),
    New(New),
    Delete(Delete),
    InitializerList(InitializerList),
    DesignatedInitializer(DesignatedInitializer),
    ArrayRange(ArrayRange),
    ExpressionList(ExpressionList),
    CompoundStatementExpr(CompoundStatementExpr),
    TypeIdExpr(TypeIdExpr),
    VariableDeclaration(VariableDeclaration),
    ForStatement(ForStatement),
    /// The unrecognized-vendor-node-class fallback of §4.7: a generic,
    /// untyped placeholder so the traversal can continue.
    Generic,
}

impl NodeKind {
    /// Every typed variant's shared state, or `None` for untyped statement
    /// nodes (`ForStatement`) and the `Generic` fallback.
    #[must_use]
    pub fn typed_state(&self) -> Option<&TypedState> {
        match self {
            Self::Literal(n) => Some(&n.typed),
            Self::UnaryOp(n) => Some(&n.typed),
            Self::BinaryOp(n) => Some(&n.typed),
            Self::ConditionalExpr(n) => Some(&n.typed),
            Self::Cast(n) => Some(&n.typed),
            Self::Call(n) => Some(&n.typed),
            Self::MemberCall(n) => Some(&n.typed),
            Self::MemberExpr(n) => Some(&n.typed),
            Self::DeclaredReference(n) => Some(&n.typed),
            Self::ArraySubscript(n) => Some(&n.typed),
            Self::New(n) => Some(&n.typed),
            Self::Delete(n) => Some(&n.typed),
            Self::InitializerList(n) => Some(&n.typed),
            Self::DesignatedInitializer(n) => Some(&n.typed),
            Self::ArrayRange(n) => Some(&n.typed),
            Self::ExpressionList(n) => Some(&n.typed),
            Self::CompoundStatementExpr(n) => Some(&n.typed),
            Self::TypeIdExpr(n) => Some(&n.typed),
            Self::VariableDeclaration(n) => Some(&n.typed),
            Self::ForStatement(_) | Self::Generic => None,
        }
    }

    #[must_use]
    pub fn typed_state_mut(&mut self) -> Option<&mut TypedState> {
        match self {
            Self::Literal(n) => Some(&mut n.typed),
            Self::UnaryOp(n) => Some(&mut n.typed),
            Self::BinaryOp(n) => Some(&mut n.typed),
            Self::ConditionalExpr(n) => Some(&mut n.typed),
            Self::Cast(n) => Some(&mut n.typed),
            Self::Call(n) => Some(&mut n.typed),
            Self::MemberCall(n) => Some(&mut n.typed),
            Self::MemberExpr(n) => Some(&mut n.typed),
            Self::DeclaredReference(n) => Some(&mut n.typed),
            Self::ArraySubscript(n) => Some(&mut n.typed),
            Self::New(n) => Some(&mut n.typed),
            Self::Delete(n) => Some(&mut n.typed),
            Self::InitializerList(n) => Some(&mut n.typed),
            Self::DesignatedInitializer(n) => Some(&mut n.typed),
            Self::ArrayRange(n) => Some(&mut n.typed),
            Self::ExpressionList(n) => Some(&mut n.typed),
            Self::CompoundStatementExpr(n) => Some(&mut n.typed),
            Self::TypeIdExpr(n) => Some(&mut n.typed),
            Self::VariableDeclaration(n) => Some(&mut n.typed),
            Self::ForStatement(_) | Self::Generic => None,
        }
    }

    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Literal(_) => "Literal",
            Self::UnaryOp(_) => "UnaryOp",
            Self::BinaryOp(_) => "BinaryOp",
            Self::ConditionalExpr(_) => "ConditionalExpr",
            Self::Cast(_) => "Cast",
            Self::Call(_) => "Call",
            Self::MemberCall(_) => "MemberCall",
            Self::MemberExpr(_) => "MemberExpr",
            Self::DeclaredReference(_) => "DeclaredReference",
            Self::ArraySubscript(_) => "ArraySubscript",
            Self::New(_) => "New",
            Self::Delete(_) => "Delete",
            Self::InitializerList(_) => "InitializerList",
            Self::DesignatedInitializer(_) => "DesignatedInitializer",
            Self::ArrayRange(_) => "ArrayRange",
            Self::ExpressionList(_) => "ExpressionList",
            Self::CompoundStatementExpr(_) => "CompoundStatementExpr",
            Self::TypeIdExpr(_) => "TypeIdExpr",
            Self::VariableDeclaration(_) => "VariableDeclaration",
            Self::ForStatement(_) => "ForStatement",
            Self::Generic => "Generic",
        }
    }
}
