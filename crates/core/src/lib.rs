//! Core library for n360
//!
//! This crate implements the **Functional Core** of the n360 portal
//! client, following the Functional Core - Imperative Shell
//! architectural pattern.
//!
//! # Architecture Overview
//!
//! The n360 project uses a two-crate architecture to enforce separation
//! of concerns:
//!
//! - **`n360_core`** (this crate): Pure transformation functions with zero I/O
//! - **`n360`**: I/O operations and orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Deterministic**: Behavior is predictable and reproducible
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! The core crate is organized by domain:
//!
//! - [`content`]: Plain-text article body to HTML fragment formatting
//! - [`plans`]: Subscription plan models and the feature resolver
//! - [`news`]: Article wire/domain models and list transformations
//! - [`pagination`]: Page math shared by the listing commands
//! - [`chat`]: Assistant reply cleanup
//! - [`etl`]: CSV analysis and datamart wire models
//!
//! Each module contains:
//!
//! - **Domain models**: Structured types representing API responses and outputs
//! - **Transformation functions**: Pure functions that convert API data to domain models
//! - **Comprehensive tests**: Unit tests using fixture data (no mocking)
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use n360_core::plans::resolve_features;
//!
//! let features = resolve_features("Plan Clásico Mensual", 14.99);
//! assert_eq!(features.len(), 6);
//! ```

pub mod chat;
pub mod content;
pub mod etl;
pub mod news;
pub mod pagination;
pub mod plans;
