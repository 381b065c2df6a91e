//! # RMS Rust Backend
//!
//! Core engine of a university Routine Management System.
//!
//! This crate provides a Rust-based backend for managing weekly class
//! routines: validated creation and update of class slots, detection of
//! room, teacher, and section conflicts, and temporary reschedules that
//! expire and revert on their own. The backend exposes a REST API via Axum
//! for the administrative frontend.
//!
//! ## Features
//!
//! - **Slot Management**: Create, update, and delete weekly class slots with
//!   full referential validation
//! - **Conflict Detection**: Classify overlapping slots by room, teacher,
//!   and section before anything is written
//! - **Routine Mirror**: Keep a per-slot full-routine view in step with the
//!   slot store
//! - **Reschedule**: Override a routine entry until an expiration date, then
//!   revert it automatically via the background sweep
//! - **Notifications**: Announce reschedules to enrolled students without
//!   blocking the request
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Core records and Data Transfer Objects (DTOs)
//! - [`models`]: Clock-time primitives and the daily time grid
//! - [`db`]: Repository pattern and storage backends
//! - [`services`]: Validation, conflict, reschedule, and sweep logic
//! - [`scheduler`]: Periodic driver for the expiration sweep
//! - [`config`]: TOML configuration for repository, notifier, and sweep
//! - [`http`]: Axum-based HTTP server and request handlers
//!

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]
//! ## Feature Flags
//!
//! - `local-repo` (default): in-memory repository backend
//! - `http-server` (default): Axum server, router, and handlers

pub mod api;

pub mod config;
pub mod db;
pub mod models;

pub mod scheduler;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
