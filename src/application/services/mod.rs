// src/application/services/mod.rs
pub mod alert_service;
pub mod alert_service_impl;
pub mod audit_service;
pub mod audit_service_impl;
pub mod service_service;
pub mod service_service_impl;
pub mod tag_service;
pub mod tag_service_impl;
