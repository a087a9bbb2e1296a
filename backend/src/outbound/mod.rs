//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL ebook store via Diesel
//! - **memory**: in-process ebook store for local runs and tests
//! - **translation**: HTTP translation provider client
//!
//! Adapters translate between domain types and infrastructure
//! representations and carry no business rules.

pub mod memory;
pub mod persistence;
pub mod translation;
