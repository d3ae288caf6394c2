//! # libcat-domain
//!
//! Pure domain model for the libcat library catalog.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, dates
//! - Define **Books** (catalogued titles) and their **Authors**
//! - Define **Book instances** (loanable copies) and their **loan status**
//! - Define **Genres** and **Languages** (name-only tags)
//! - Define **Users** (identities + permissions) and visitor **Sessions**
//! - Define **pagination** value types shared by every listing
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod pagination;
pub mod session;
pub mod user;
