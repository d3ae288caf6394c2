//! # libcat-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **server-side-rendered catalog pages** (home, book and author
//!   listings and details, loan listings) as complete HTML
//! - Track visitors with a `sessionid` cookie backed by the session store
//! - Turn access failures into responses: anonymous visitors are redirected
//!   to the login page, visitors lacking a permission get `403`
//! - Map HTTP requests into application service calls (driving adapter)
//!
//! ## Dependency rule
//! Depends on `libcat-app` (for port traits and services) and `libcat-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod error;
pub mod pages;
pub mod router;
pub mod session;
pub mod state;
