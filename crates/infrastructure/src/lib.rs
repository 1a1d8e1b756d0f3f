//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod http_session_verifier;
mod in_memory_sub_admin_repository;
mod postgres_audit_repository;
mod postgres_sub_admin_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use http_session_verifier::HttpSessionVerifier;
pub use in_memory_sub_admin_repository::{InMemoryAuditRepository, InMemorySubAdminRepository};
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_sub_admin_repository::PostgresSubAdminRepository;
