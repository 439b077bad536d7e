// soil-lab-backend/src/domain/mod.rs
pub mod actor;
pub mod equipment_model;
pub mod organization_model;
pub mod role_model;
pub mod test_record_model;
pub mod user_model;
