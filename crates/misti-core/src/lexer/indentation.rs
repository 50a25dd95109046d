// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Misti contributors

//! Indentation tracking.
//!
//! The stack holds the widths of every open block, strictly increasing from a
//! permanent `0` at the bottom. Each logical line with content is measured
//! once against the top of the stack:
//!
//! ```text
//! id1              stack [0]
//!     id2          stack [0, 4]       -> Indent
//!         id3      stack [0, 4, 8]    -> Indent
//! id4              stack [0]          -> Dedent, Dedent
//! ```

use thiserror::Error;

/// Misuse of the stack, or a dedent that matches no open level.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndentationError {
    /// `increase_to` with a width not above the current level
    #[error("Attempted to add a lower indentation level ({requested} <= {current})")]
    NotDeeper {
        /// Width asked for
        requested: usize,
        /// Width on top of the stack
        current: usize,
    },

    /// `decrease_to` with a width not below the current level
    #[error(
        "Attempted to decrease to a value greater than or equal to the current level ({requested} >= {current})"
    )]
    NotShallower {
        /// Width asked for
        requested: usize,
        /// Width on top of the stack
        current: usize,
    },

    /// Levels were popped but none of them had the requested width
    #[error("Indentation of {requested} matches no enclosing level")]
    Misaligned {
        /// Width asked for
        requested: usize,
        /// Levels closed on the way down
        popped: usize,
        /// Width now on top of the stack
        landed_on: usize,
    },
}

/// The result of measuring one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentChange {
    /// Same level as the previous line
    Unchanged,
    /// One new level opened
    Indent,
    /// This many levels closed
    Dedent(usize),
}

/// Stack of open indentation widths.
#[derive(Debug, Clone)]
pub struct IndentationStack {
    levels: Vec<usize>,
}

impl Default for IndentationStack {
    fn default() -> Self {
        Self::new()
    }
}

impl IndentationStack {
    /// Creates a stack holding only level `0`.
    pub fn new() -> Self {
        Self { levels: vec![0] }
    }

    /// The innermost open level.
    pub fn current(&self) -> usize {
        self.levels.last().copied().unwrap_or(0)
    }

    /// Number of open levels, counting the base level.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Opens a new level.
    pub fn increase_to(&mut self, level: usize) -> Result<(), IndentationError> {
        let current = self.current();
        if level <= current {
            return Err(IndentationError::NotDeeper {
                requested: level,
                current,
            });
        }
        self.levels.push(level);
        Ok(())
    }

    /// Closes levels until the top is `level`, returning how many were closed.
    ///
    /// When no open level equals `level`, every level above it is still
    /// closed and [`IndentationError::Misaligned`] reports the pops.
    pub fn decrease_to(&mut self, level: usize) -> Result<usize, IndentationError> {
        let current = self.current();
        if level >= current {
            return Err(IndentationError::NotShallower {
                requested: level,
                current,
            });
        }

        let mut popped = 0;
        while self.levels.len() > 1 && self.current() > level {
            self.levels.pop();
            popped += 1;
        }

        let landed_on = self.current();
        if landed_on == level {
            Ok(popped)
        } else {
            Err(IndentationError::Misaligned {
                requested: level,
                popped,
                landed_on,
            })
        }
    }

    /// Compares a line's leading width to the top of the stack and updates it.
    pub fn measure(&mut self, width: usize) -> Result<IndentChange, IndentationError> {
        let current = self.current();
        if width > current {
            self.increase_to(width)?;
            tracing::debug!(width, depth = self.depth(), "indent");
            Ok(IndentChange::Indent)
        } else if width < current {
            let popped = self.decrease_to(width)?;
            tracing::debug!(width, popped, "dedent");
            Ok(IndentChange::Dedent(popped))
        } else {
            Ok(IndentChange::Unchanged)
        }
    }
}
