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

//! File-location-prefixed logging (§4.9): a thin helper over the `log`
//! facade so call sites in the dispatcher stay one-line, mirroring the
//! teacher's one-reason-per-variant `Error` enum in spirit if not in type.

use log::Level;

use crate::location::Location;

/// Logs `message` at `level`, prefixed with `location`. The dispatcher
/// calls this instead of the bare `log` macros wherever §4.7 requires a
/// file-location-prefixed event.
pub fn log_at(level: Level, location: &Location, message: &str) {
    match level {
        Level::Error => log::error!("{location}: {message}"),
        Level::Warn => log::warn!("{location}: {message}"),
        Level::Info => log::info!("{location}: {message}"),
        Level::Debug => log::debug!("{location}: {message}"),
        Level::Trace => log::trace!("{location}: {message}"),
    }
}
