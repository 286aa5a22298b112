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

//! Consumed interfaces (§6): the collaborator traits a host must provide.
//! These describe the vendor AST this core walks and the two resolvers it
//! calls into; none of them are implemented here.

use crate::{
    ids::NodeId,
    location::Location,
    nodes::{
        BinaryOpKind,
        CastKind,
        TypeIdOperator,
        UnaryOpKind,
    },
};

/// What kind of literal a `VendorShape::Literal` node carries, ahead of
/// the radix/suffix parsing the literal lowerer (§4.5) performs on the raw
/// text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Floating { single_precision: bool },
    Bool,
    Char,
    Str,
    /// Unrecognized vendor literal shape (§4.7): lowered with the raw text
    /// and the vendor-reported type, never invented.
    Other,
}

/// One designator of a `DesignatedInitializer` (§4.6). Index and range
/// designators name the child positions (in `VendorNode::children`) of
/// their operand expressions; the designated initializer's own RHS is
/// always that node's *last* child.
#[derive(Debug, Clone)]
pub enum VendorDesignator {
    Index(usize),
    Field(String),
    Range(usize, usize),
}

/// The vendor node class a handler dispatches on (§4.6). Each variant
/// documents which of `VendorNode::children()` it expects and in what
/// order; absent optional children (e.g. the GNU `?:` shortcut's missing
/// "then" branch) are simply missing from the slice rather than `None`
/// entries, since trait objects can't carry a typed `Option` uniformly.
#[derive(Debug, Clone)]
pub enum VendorShape {
    /// No children; the raw literal text is `VendorNode::code()`.
    Literal(LiteralKind),
    /// One child: the operand.
    Unary { op: UnaryOpKind, prefix: bool },
    /// Two children: lhs, rhs.
    Binary { op: BinaryOpKind },
    /// Two or three children: condition, (optional then), else.
    Conditional,
    /// One child: the operand.
    Cast { operator_kind: CastKind },
    /// Zero or one child: the initializer, if present.
    New,
    /// One child: the operand.
    Delete,
    /// Any number of children: the ordered clauses.
    InitializerList,
    /// N designator children plus a trailing RHS child.
    DesignatedInitializer { designators: Vec<VendorDesignator> },
    /// Two children: floor, ceiling.
    ArrayRange,
    /// Any number of children.
    ExpressionList,
    /// One child: the body.
    CompoundStatementExpr,
    /// No children; the probed type spelling is `declared_type_spelling`.
    TypeIdExpr { operator: TypeIdOperator },
    /// No children; the identifier is `VendorNode::name()`.
    DeclaredReference,
    /// Two children: array, index.
    ArraySubscript,
    /// Two children: base, member.
    MemberExpr,
    /// One child: the wrapped expression, dropped transparently (§4.6).
    Parenthesized,
    /// One callee child followed by its argument children.
    Call,
    VariableDeclaration {
        is_array: bool,
        implicit_initializer_allowed: bool,
    },
    /// Exactly five children in fixed order: initializer statement,
    /// condition declaration, condition expression, iteration expression,
    /// body — any of which may themselves be `VendorShape::Empty`.
    ForStatement,
    /// An intentionally-absent optional slot (e.g. one of `ForStatement`'s
    /// five, or the omitted "then" of a GNU `?:`). The dispatcher treats
    /// this as `None` rather than lowering a node for it.
    Empty,
    /// The fallback for a vendor class the dispatcher does not recognize
    /// (§4.7): logged at ERROR and lowered to `NodeKind::Generic`.
    Unrecognized,
}

/// A single node of the host's vendor AST. The dispatcher (§4.6) only ever
/// reads through this trait; it never assumes a concrete parser.
pub trait VendorNode: std::fmt::Debug {
    fn location(&self) -> Location;
    fn code(&self) -> &str;
    fn name(&self) -> &str;
    /// The type spelling the vendor parser reports for this node, or a
    /// problem/placeholder spelling the type registry will turn into
    /// `Unknown` (§4.7 condition 2).
    fn declared_type_spelling(&self) -> &str;
    fn shape(&self) -> VendorShape;
    fn children(&self) -> Vec<&dyn VendorNode>;
}

/// Resolves a vendor-AST name to a previously-created declaration node
/// (§6). Implemented by the host's symbol table.
pub trait BindingResolver {
    fn resolve(&self, vendor_name: &str) -> Option<NodeId>;
}

/// Yields the current fully-qualified name prefix for free-call name
/// construction (§6). The policy for when this applies inside a class vs.
/// a namespace is an open question the core does not decide (§9) — the
/// hook exists, but the dispatcher does not yet call it for anything
/// beyond what §4.6 spells out literally.
pub trait ScopeResolver {
    fn current_prefix(&self) -> String;
}
