//! Production Planner
//!
//! Computes how much power each plant must produce to meet a load exactly at
//! minimum cost, honouring every plant's minimum stable generation and
//! (availability-derated) capacity.
//!
//! The core is pure and synchronous: [`domain`] holds the request model,
//! [`optimizer`] the cost model, capacity resolver and dispatch engine,
//! [`plan`] the reported output. [`controller`] wires them into a
//! request-scoped pipeline and [`api`] exposes it over HTTP.

pub mod api;
pub mod config;
pub mod controller;
pub mod domain;
pub mod optimizer;
pub mod plan;
pub mod telemetry;
