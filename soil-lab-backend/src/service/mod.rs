// src/service/mod.rs
pub mod hierarchical_access_service;
pub mod lab_record_service;
pub mod organization_access_service;
pub mod organization_service;
pub mod user_service;
