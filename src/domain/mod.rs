// src/domain/mod.rs
pub mod alert;
pub mod audit;
pub mod error;
pub mod repositories;
pub mod service;
pub mod services;
pub mod tag;
pub mod user;
