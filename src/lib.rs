//! Declarative reconciler for managed database clusters.
//!
//! The crate drives a remote, eventually-consistent database service
//! toward a declared configuration: typed resource specs, a
//! desired-vs-observed diff engine, per-resource reconcilers with
//! provisioning waiters, and a per-engine policy table. The HTTP
//! transport is abstracted behind [`client::ControlPlaneClient`]; hosts
//! supply an implementation and call the per-resource operations in
//! [`reconciler`].

pub mod client;
pub mod id;
pub mod policy;
pub mod reconciler;
pub mod spec;

pub use client::{ControlPlaneClient, ControlPlaneError};
pub use policy::Engine;
pub use reconciler::{Context, Diagnostic, Error, ReconcilerConfig, Result, Severity};
