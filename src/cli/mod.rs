//! Command line interface for the Exascan server binary.

pub mod args;
