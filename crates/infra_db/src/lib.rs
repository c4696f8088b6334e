//! Infrastructure Database Layer
//!
//! PostgreSQL storage for submitted claims and the triage audit trail,
//! implemented with SQLx.
//!
//! # Architecture
//!
//! Repositories own the SQL and work in row types. The
//! [`adapters::PostgresClaimAdapter`] sits on top of them and implements the
//! claim domain's ports, translating rows to domain records and
//! [`DatabaseError`] to `PortError`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::PostgresClaimAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/claims")).await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresClaimAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::PostgresClaimAdapter;
