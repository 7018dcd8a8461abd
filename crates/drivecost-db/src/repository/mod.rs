//! # Repository Module
//!
//! Database repository implementations for drivecost.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI command                                                            │
//! │       │                                                                 │
//! │       │  db.profiles().get_by_id("…")                                   │
//! │       ▼                                                                 │
//! │  ProfileRepository                                                      │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── list(&self)                                                        │
//! │  ├── insert(&self, profile)    ← validation gate                        │
//! │  ├── update(&self, profile)    ← validation gate                        │
//! │  ├── delete(&self, id)                                                  │
//! │  └── count(&self)                                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod profile;
