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

#![doc = include_str!("../README.md")]
#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::similar_names,
    clippy::struct_field_names,
    clippy::too_many_lines
)]

pub mod binding;
pub mod context;
pub mod dispatch;
pub mod errors;
pub mod graph;
pub mod host;
pub mod ids;
pub mod literal;
pub mod location;
pub mod log_util;
pub mod nodes;
pub mod propagation;
pub mod types;

pub use context::{
    lower_translation_unit,
    LoweringContext,
};
pub use errors::{
    Error,
    Result,
};
pub use graph::Graph;
pub use ids::NodeId;
