// src/api/dto/mod.rs
pub mod lab_record_dto;
pub mod organization_dto;
pub mod user_dto;
