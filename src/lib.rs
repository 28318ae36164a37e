//! Trip Planner - trips with a budget ledger, packing tracker and activity
//! itinerary.
//!
//! Layers follow the ports-and-adapters split: `domain` holds the
//! aggregates and their rules, `ports` the traits for storage and
//! collaborators, `application` the command/query handlers, and `adapters`
//! the Postgres, in-memory, HTTP and collaborator implementations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
