// tests/common/auth_helper.rs

use soil_lab_backend::domain::actor::Actor;
use soil_lab_backend::domain::role_model::Role;
use soil_lab_backend::utils::jwt::{JwtManager, TokenSubject};

/// 正規ロールのトークン
pub fn token_for(jwt_manager: &JwtManager, role: Role, organization_id: Option<i32>) -> String {
    let label = role.as_str().to_lowercase();
    let actor = Actor::new(
        format!("uid-{}", label),
        format!("{}@lab.example", label),
        role,
        organization_id,
    );
    jwt_manager
        .generate_access_token(TokenSubject::from(&actor))
        .unwrap()
}

/// 任意のロールラベルで署名したトークン
pub fn token_with_role_label(jwt_manager: &JwtManager, role: &str) -> String {
    jwt_manager
        .generate_access_token(TokenSubject {
            uid: "uid-raw".to_string(),
            email: "raw@lab.example".to_string(),
            role: role.to_string(),
            organization_id: Some(1),
        })
        .unwrap()
}
