//! SRZ Kernel: the deterministic verification core of a Simulation
//! Responsibility Zone engine.
//!
//! # API Surface
//!
//! The kernel exposes the entry-point catalog described in
//! `SPEC_FULL.md` §6:
//!
//! - [`domain::domain_init`] / [`domain::domain_free`] -- domain lifecycle
//! - [`query`] -- the six single-entity query functions
//! - [`region::region_query`] -- region aggregation
//! - [`resolve::resolve`] -- the per-region verification sweep
//! - [`capsule`] -- collapse / expand / capsule listing
//!
//! # Module Dependency Direction
//!
//! `fixed`, `budget`, `entity`, `flags`, `limits` ← `surface` ← `domain` ←
//! `chain` ← `query`, `region`, `resolve`, `capsule`
//!
//! One-way only. No cycles. `domain` owns the entity tables; `chain`,
//! `query`, `region`, `resolve`, and `capsule` all read or mutate a
//! `Domain` but never each other's internals directly.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod budget;
pub mod capsule;
pub mod chain;
pub mod domain;
pub mod entity;
pub mod fixed;
pub mod flags;
pub mod limits;
pub mod query;
pub mod region;
pub mod resolve;
pub mod surface;
