//! # libcat-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `BookRepository`, `AuthorRepository`, `BookInstanceRepository`,
//!     `TagRepository`: the read-only record store
//!   - `SessionStore`: per-visitor session persistence
//!   - `UserRepository`: identity and permission lookup
//! - Define **driving/inbound ports** as use-case structs:
//!   - `CatalogService`: home statistics, listings, details, loans
//!   - `SessionService`: load/persist sessions, resolve the current user
//! - Enforce **access rules** (login required, permission required)
//!
//! ## Dependency rule
//! Depends on `libcat-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod access;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
