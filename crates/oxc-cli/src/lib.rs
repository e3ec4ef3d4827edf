// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]
//! Library half of the `oxc` command-line tool.

pub mod commands;
pub mod format;
