// src/application/mod.rs
pub mod error;
pub mod locks;
pub mod services;

// Re-export key services for easier imports
pub use services::alert_service_impl::AlertServiceImpl;
pub use services::audit_service_impl::AuditServiceImpl;
pub use services::service_service_impl::ServiceServiceImpl;
pub use services::tag_service_impl::TagServiceImpl;
