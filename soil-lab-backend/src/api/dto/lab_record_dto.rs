// soil-lab-backend/src/api/dto/lab_record_dto.rs

use crate::domain::test_record_model::{self, TestType};
use crate::domain::equipment_model;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRecordResponse {
    pub id: i32,
    pub organization_id: i32,
    /// 未知の種別はそのままのラベルで返す
    pub test_type: String,
    pub known_test_type: Option<TestType>,
    pub sample_code: String,
    pub registered_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<test_record_model::Model> for TestRecordResponse {
    fn from(model: test_record_model::Model) -> Self {
        Self {
            known_test_type: TestType::parse(&model.test_type),
            id: model.id,
            organization_id: model.organization_id,
            test_type: model.test_type,
            sample_code: model.sample_code,
            registered_by: model.registered_by,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentResponse {
    pub id: i32,
    pub organization_id: i32,
    pub name: String,
    pub kind: String,
    pub calibration_due: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<equipment_model::Model> for EquipmentResponse {
    fn from(model: equipment_model::Model) -> Self {
        Self {
            id: model.id,
            organization_id: model.organization_id,
            name: model.name,
            kind: model.kind,
            calibration_due: model.calibration_due,
            created_at: model.created_at,
        }
    }
}
