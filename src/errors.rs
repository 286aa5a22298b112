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

//! Error taxonomy for the few operations that are genuinely fallible at the
//! API boundary. The day-to-day placeholder policy (unknown vendor node
//! classes, problem types, literal overflow) is absorbed and logged rather
//! than surfaced here — see [`crate::log_util`].

use crate::ids::NodeId;

#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("node {0:?} is not present in this graph's arena")]
    UnknownNode(NodeId),

    #[error("translation unit lowering produced no root node")]
    MissingRoot,

    #[error("designated initializer must have at least one designator")]
    EmptyDesignatorList,
}

pub type Result<T> = std::result::Result<T, Error>;
