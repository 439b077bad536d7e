// soil-lab-backend/src/domain/role_model.rs

use crate::error::AccessError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// ラボ内のロール。ランクは `ROLE_RANKS` だけが定義する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Viewer,
    Technician,
    Supervisor,
    Manager,
    Admin,
    Developer,
}

/// ロール・ラベル・ランクの単一テーブル（低 → 高）
static ROLE_RANKS: [(Role, &str, u8); 6] = [
    (Role::Viewer, "VIEWER", 1),
    (Role::Technician, "TECHNICIAN", 2),
    (Role::Supervisor, "SUPERVISOR", 3),
    (Role::Manager, "MANAGER", 4),
    (Role::Admin, "ADMIN", 5),
    (Role::Developer, "DEVELOPER", 6),
];

impl Role {
    /// 低いランクから順に並んだ全ロール
    pub const ALL: [Role; 6] = [
        Role::Viewer,
        Role::Technician,
        Role::Supervisor,
        Role::Manager,
        Role::Admin,
        Role::Developer,
    ];

    fn entry(&self) -> &'static (Role, &'static str, u8) {
        // ROLE_RANKSは全バリアントを網羅している
        &ROLE_RANKS[self.index()]
    }

    fn index(&self) -> usize {
        match self {
            Role::Viewer => 0,
            Role::Technician => 1,
            Role::Supervisor => 2,
            Role::Manager => 3,
            Role::Admin => 4,
            Role::Developer => 5,
        }
    }

    /// ロール名を文字列として取得
    pub fn as_str(&self) -> &'static str {
        self.entry().1
    }

    /// 権限ランクを数値で取得（高いほど強い権限）
    pub fn rank(&self) -> u8 {
        self.entry().2
    }

    /// ラベルからロールを解析（大文字小文字は区別しない）
    pub fn parse(label: &str) -> Result<Self, AccessError> {
        let normalized = label.trim().to_uppercase();
        ROLE_RANKS
            .iter()
            .find(|(_, name, _)| *name == normalized)
            .map(|(role, _, _)| *role)
            .ok_or_else(|| AccessError::UnknownRole(label.to_string()))
    }

    /// ラベルから直接ランクを取得
    pub fn rank_of(label: &str) -> Result<u8, AccessError> {
        Self::parse(label).map(|role| role.rank())
    }

    /// 同ランク以上なら対象ロールに対して上位者として振る舞える
    pub fn can_act_as_superior_of(&self, target: Role) -> bool {
        self.rank() >= target.rank()
    }

    pub fn is_admin_or_above(&self) -> bool {
        self.can_act_as_superior_of(Role::Admin)
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_conversion() {
        assert_eq!(Role::Viewer.as_str(), "VIEWER");
        assert_eq!(Role::Developer.as_str(), "DEVELOPER");

        assert_eq!(Role::parse("admin"), Ok(Role::Admin));
        assert_eq!(Role::parse("SUPERVISOR"), Ok(Role::Supervisor));
        assert_eq!(Role::parse(" technician "), Ok(Role::Technician));
        assert_eq!(
            Role::parse("SUPER_ADMIN"),
            Err(AccessError::UnknownRole("SUPER_ADMIN".to_string()))
        );
        assert!(Role::rank_of("member").is_err());
    }

    #[test]
    fn test_canonical_ranks() {
        let ranks: Vec<u8> = Role::ALL.iter().map(|r| r.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(Role::rank_of("MANAGER"), Ok(4));
    }

    #[test]
    fn test_rank_is_strict_total_order() {
        for pair in Role::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for a in Role::ALL {
            for b in Role::ALL {
                if a != b {
                    assert_ne!(a.rank(), b.rank());
                }
            }
        }
    }

    #[test]
    fn test_superiority_matches_rank_comparison() {
        for actor in Role::ALL {
            assert!(actor.can_act_as_superior_of(actor));
            for target in Role::ALL {
                assert_eq!(
                    actor.can_act_as_superior_of(target),
                    actor.rank() >= target.rank()
                );
            }
        }
        assert!(!Role::Admin.can_act_as_superior_of(Role::Developer));
    }

    #[test]
    fn test_serde_uses_canonical_labels() {
        let json = serde_json::to_string(&Role::Supervisor).unwrap();
        assert_eq!(json, "\"SUPERVISOR\"");
        let role: Role = serde_json::from_str("\"DEVELOPER\"").unwrap();
        assert_eq!(role, Role::Developer);
    }
}
