// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Failure to resolve a binding expression against the value of an update.
///
/// This always points at a mismatch between markup and the shape of the data
/// pushed into the state, so it is surfaced instead of rendering a blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("binding `{expr}`: no field `{segment}` on the supplied value")]
    MissingPath { expr: String, segment: String },
    #[error("binding `{expr}`: can't look up `{segment}` on a non-object value")]
    NotAnObject { expr: String, segment: String },
}
