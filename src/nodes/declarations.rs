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

//! Declaration and statement payloads the core needs (§3).

use crate::{
    ids::NodeId,
    nodes::typed::TypedState,
};

#[derive(Debug, Clone)]
pub struct VariableDeclaration {
    pub typed: TypedState,
    pub initializer: Option<NodeId>,
    pub implicit_initializer_allowed: bool,
    pub is_array: bool,
}

/// `ForStatement`'s five optional slots (§3). Not typed: statements carry
/// no T/S of their own.
#[derive(Debug, Clone, Default)]
pub struct ForStatement {
    pub initializer_statement: Option<NodeId>,
    pub condition_declaration: Option<NodeId>,
    pub condition_expression: Option<NodeId>,
    pub iteration_expression: Option<NodeId>,
    pub body: Option<NodeId>,
}
