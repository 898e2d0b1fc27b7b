// ABOUTME: Library crate for portal-builder exposing the site configuration engine
// Catalog, order engine, draft store, wizard controller and persistence client

#![allow(missing_docs)]

pub mod api;
pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod draft;
pub mod error;
pub mod models;
pub mod ordering;
pub mod wizard;

pub use error::{BuilderError, BuilderResult, RemoteError, RemoteErrorKind, ValidationIssue};
