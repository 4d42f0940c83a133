//! Client-side core of a customer relationship management UI.
//!
//! The crate is layered the same way the views consume it:
//!
//! - [`domain`] — the `Customer` record, repeated contact field descriptors,
//!   validation predicates and URL normalization.
//! - [`forms`] — the dynamic form controller holding the working copy of a
//!   record, with growable contact field slots and a live preview projection.
//! - [`repository`] — async contracts for the backend REST API (customer CRUD
//!   and image upload), a `reqwest` implementation, and an in-memory fake.
//! - [`services`] — business operations bridging views and the collaborators,
//!   plus the in-memory customer collection behind the list view.
//! - [`dto`] — read-only projections shaped for rendering.
//! - [`models`] — configuration loaded from files and environment variables.

pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod repository;
pub mod services;
