//! Fixture-driven companion tool for `srz-kernel`: loads a
//! `DOMINIUM_SRZ_FIXTURE_V1` text fixture, builds a `Domain` from it,
//! and runs one of the kernel's operations against it, printing a
//! versioned `key=value` report.

pub mod commands;
pub mod error;
pub mod fixture;
pub mod hash;
