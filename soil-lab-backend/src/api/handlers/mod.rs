// src/api/handlers/mod.rs
pub mod lab_record_handler;
pub mod organization_handler;
pub mod system_handler;
pub mod user_handler;
