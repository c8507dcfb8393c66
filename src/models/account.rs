//! # 계정 모델
//!
//! 학생·교사·학부모·관리자는 각자의 테이블에 저장되지만,
//! 조회할 때는 역할 판별자(`role`)를 가진 하나의 합 타입 [`Account`]로 다룹니다.
//! DB의 `accounts` 뷰가 네 테이블을 합쳐 주므로 역할을 찾기 위해 테이블을 차례로 뒤질 필요가 없습니다.

use crate::ids::BinaryId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    Student,
    Teacher,
    Parent,
    Administrator,
}

impl AccountRole {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountRole::Student => "student",
            AccountRole::Teacher => "teacher",
            AccountRole::Parent => "parent",
            AccountRole::Administrator => "administrator",
        }
    }

    /// 이 역할의 계정이 저장되는 테이블 이름
    pub fn table(self) -> &'static str {
        match self {
            AccountRole::Student => "students",
            AccountRole::Teacher => "teachers",
            AccountRole::Parent => "parents",
            AccountRole::Administrator => "administrators",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(AccountRole::Student),
            "teacher" => Ok(AccountRole::Teacher),
            "parent" => Ok(AccountRole::Parent),
            "administrator" => Ok(AccountRole::Administrator),
            other => Err(format!("unknown account role '{}'", other)),
        }
    }
}

/// 역할과 무관하게 모든 계정이 공유하는 프로필 필드
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Profile {
    #[sqlx(try_from = "Vec<u8>")]
    pub id: BinaryId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: String,
}

/// 역할별 계정. JSON에서는 `{ "role": "teacher", "id": ..., ... }` 형태로 직렬화됩니다.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Account {
    Student(Profile),
    Teacher(Profile),
    Parent(Profile),
    Administrator(Profile),
}

impl Account {
    pub fn new(role: AccountRole, profile: Profile) -> Self {
        match role {
            AccountRole::Student => Account::Student(profile),
            AccountRole::Teacher => Account::Teacher(profile),
            AccountRole::Parent => Account::Parent(profile),
            AccountRole::Administrator => Account::Administrator(profile),
        }
    }

    pub fn role(&self) -> AccountRole {
        match self {
            Account::Student(_) => AccountRole::Student,
            Account::Teacher(_) => AccountRole::Teacher,
            Account::Parent(_) => AccountRole::Parent,
            Account::Administrator(_) => AccountRole::Administrator,
        }
    }

    pub fn profile(&self) -> &Profile {
        match self {
            Account::Student(p)
            | Account::Teacher(p)
            | Account::Parent(p)
            | Account::Administrator(p) => p,
        }
    }
}

/// `accounts` 뷰의 한 행 (역할 문자열 + 프로필)
#[derive(Debug, sqlx::FromRow)]
pub struct AccountRow {
    pub role: String,
    #[sqlx(flatten)]
    pub profile: Profile,
}

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub role: AccountRole,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}
