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

//! Small closed vocabularies used by the expression variants (§3), styled
//! after the teacher's own operator/kind enums in `nodes/enums.rs`.

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UnaryOpKind {
    PreIncrement,
    PreDecrement,
    PostIncrement,
    PostDecrement,
    Plus,
    Minus,
    Deref,
    AddrOf,
    BitNot,
    LogNot,
    SizeOf,
    Throw,
    TypeId,
    AlignOf,
    SizeOfPack,
    NoExcept,
    LabelRef,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BinaryOpKind {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    BitAnd,
    BitOr,
    BitXor,
    LogAnd,
    LogOr,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    ShlAssign,
    ShrAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    Comma,
    /// `.` as a binary operator, the second of the three member-call
    /// shapes the dispatcher discriminates in §4.6.
    Dot,
    Arrow,
    PtrMemD,
    PtrMemI,
}

/// Operator kind on a `Cast` node (§3). `CStyle` corresponds to the
/// vendor's "operator code 4" named in §4.6.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CastKind {
    Implicit,
    Static,
    Dynamic,
    Reinterpret,
    Const,
    CStyle,
}

/// `TypeIdExpr`'s operator code (§4.6), mapped to a canonical result type
/// by [`crate::dispatch::lower_type_id_expr`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TypeIdOperator {
    SizeOf,
    TypeId,
    AlignOf,
    TypeOf,
}
