pub mod alert_repository;
pub mod audit_repository;
pub mod service_repository;
pub mod tag_repository;
