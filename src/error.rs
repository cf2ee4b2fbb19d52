// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error types for configuring and running a render.

use failure::Fail;
use std::io;

/// Everything that can stop a render from producing an image.  The
/// sampler itself has no failure mode; a point either contributes
/// increments or it doesn't.
#[derive(Debug, Fail)]
pub enum Error {
    /// A configuration value was out of range or unrecognized.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// The output file could not be created or written.
    #[fail(display = "could not write {}: {}", path, cause)]
    Output {
        /// Where we were trying to write.
        path: String,
        /// What the operating system said about it.
        #[fail(cause)]
        cause: io::Error,
    },

    /// A thread of the worker pool panicked before draining its queue.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
