// soil-lab-backend/src/service/user_service.rs

use crate::domain::user_model::User;
use crate::error::{AppError, AppResult};
use crate::log_with_context;
use crate::repository::directory::UserStore;
use crate::service::hierarchical_access_service::AccessScope;
use std::sync::Arc;

pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// 主体が閲覧できるユーザー一覧
    ///
    /// 保存済みロールが正規ラベルでない行があれば `UnknownRole` で失敗する。
    pub async fn list_visible_users(&self, scope: &AccessScope<'_>) -> AppResult<Vec<User>> {
        let candidates = self
            .users
            .list_users()
            .await?
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let visible = scope.filter_users(candidates).await?;

        log_with_context!(
            tracing::Level::INFO,
            "Visible users listed",
            "actor_uid" => &scope.actor().uid,
            "visible_count" => visible.len()
        );
        Ok(visible)
    }

    /// 存在しないユーザーと閲覧できないユーザーは同じ拒否になる
    pub async fn get_visible_user(&self, scope: &AccessScope<'_>, user_id: i32) -> AppResult<User> {
        let Some(model) = self.users.find_by_id(user_id).await? else {
            return Err(AppError::access_denied());
        };
        let user = User::try_from(model)?;

        if !scope.can_access_user(&user).await? {
            return Err(AppError::access_denied());
        }
        Ok(user)
    }
}
