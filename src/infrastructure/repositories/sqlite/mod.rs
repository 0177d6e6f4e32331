pub mod alert_repository;
pub mod audit_repository;
pub mod connection;
pub mod error;
pub mod migration;
pub mod model;
pub mod schema;
pub mod service_repository;
pub mod tag_repository;
