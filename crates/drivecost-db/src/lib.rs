//! # drivecost-db: Profile Store for drivecost
//!
//! This crate persists vehicle profiles. It uses SQLite for local storage
//! with sqlx for async operations, and reads/writes single profiles as JSON
//! documents for import and export.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        drivecost Data Flow                              │
//! │                                                                         │
//! │  CLI command (profile create, calculate, ...)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                   drivecost-db (THIS CRATE)                     │    │
//! │  │                                                                 │    │
//! │  │   ┌───────────────┐   ┌─────────────────┐   ┌──────────────┐    │    │
//! │  │   │   Database    │   │   Repository    │   │  Migrations  │    │    │
//! │  │   │   (pool.rs)   │◄──│  (profile.rs)   │   │  (embedded)  │    │    │
//! │  │   └───────────────┘   └─────────────────┘   └──────────────┘    │    │
//! │  │                                                                 │    │
//! │  │   ┌─────────────────────────────────────┐                       │    │
//! │  │   │ interchange.rs: JSON import/export  │                       │    │
//! │  │   └─────────────────────────────────────┘                       │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │   SQLite Database (platform data dir)/drivecost.db              │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Error types
//! - [`repository`] - Profile repository
//! - [`interchange`] - JSON documents for single profiles
//!
//! ## Usage
//!
//! ```rust,ignore
//! use drivecost_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/drivecost.db")).await?;
//! db.profiles().insert(&profile).await?;
//! let all = db.profiles().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod interchange;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use interchange::{export_profile, import_profile, read_profile};
pub use pool::{Database, DbConfig};
pub use repository::profile::ProfileRepository;
