// src/repository/mod.rs
pub mod directory;
pub mod lab_record_repository;
pub mod memory;
pub mod organization_repository;
pub mod user_repository;
