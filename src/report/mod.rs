//! Output for lookup and batch results.
//!
//! - [`csv`] — `subnet,origin,rpki` rows written by batch mode.
//! - [`terminal`] — colored prefix panels and origin tables for interactive and
//!   one-shot queries, plus the error panel.
//! - [`json`] — machine-readable one-shot query output.

pub mod csv;
pub mod json;
pub mod terminal;
