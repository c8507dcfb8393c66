//! # 계정 데이터베이스 쿼리 모듈
//!
//! 계정은 역할별 테이블(`students`, `teachers`, `parents`, `administrators`)에 저장하고,
//! 역할 판별은 `accounts` 뷰에 대한 단일 조회로 처리합니다.

use crate::error::AppError;
use crate::ids::BinaryId;
use crate::models::{Account, AccountRole, AccountRow, CreateAccountRequest, Profile};
use sqlx::SqlitePool;

/// 새 계정을 역할에 맞는 테이블에 생성합니다.
pub async fn create_account(
    pool: &SqlitePool,
    req: &CreateAccountRequest,
) -> Result<Account, AppError> {
    let id = BinaryId::new();

    // 테이블 이름은 AccountRole이 정하는 고정 문자열이므로 format!으로 넣어도 안전합니다.
    let sql = format!(
        "INSERT INTO {} (id, first_name, last_name, email) VALUES (?, ?, ?, ?)",
        req.role.table()
    );

    // 같은 역할 테이블 안의 UNIQUE(email) 위반은 500이 아니라 409로 보고합니다.
    // (라우트의 사전 검사와 삽입 사이에 같은 이메일이 먼저 들어온 경우)
    sqlx::query(&sql)
        .bind(id.as_bytes())
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .execute(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Email already exists".to_string())
            }
            other => AppError::Database(other),
        })?;

    resolve_account(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created account".to_string()))
}

/// 식별자로 계정을 찾아 역할과 함께 반환합니다.
pub async fn resolve_account(
    pool: &SqlitePool,
    id: &BinaryId,
) -> Result<Option<Account>, AppError> {
    let row = sqlx::query_as::<_, AccountRow>(
        r#"
        SELECT id, role, first_name, last_name, email, created_at
        FROM accounts
        WHERE id = ?
        "#,
    )
    .bind(id.as_bytes())
    .fetch_optional(pool)
    .await?;

    row.map(into_account).transpose()
}

/// 역할과 무관하게 이메일로 계정을 찾습니다.
///
/// 역할 테이블마다 UNIQUE 제약이 따로 걸려 있으므로,
/// 역할을 넘나드는 중복은 `accounts` 뷰를 통한 이 조회로 막습니다.
pub async fn find_account_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Account>, AppError> {
    let row = sqlx::query_as::<_, AccountRow>(
        r#"
        SELECT id, role, first_name, last_name, email, created_at
        FROM accounts
        WHERE email = ?
        LIMIT 1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    row.map(into_account).transpose()
}

// 뷰의 role 문자열은 마이그레이션이 정한 고정값이므로 파싱 실패는 내부 오류입니다.
fn into_account(row: AccountRow) -> Result<Account, AppError> {
    let role: AccountRole = row.role.parse().map_err(AppError::Internal)?;
    Ok(Account::new(role, row.profile))
}

/// 교사 존재 여부 확인용 조회
pub async fn find_teacher(pool: &SqlitePool, id: &BinaryId) -> Result<Option<Profile>, AppError> {
    let teacher = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, first_name, last_name, email, created_at
        FROM teachers
        WHERE id = ?
        "#,
    )
    .bind(id.as_bytes())
    .fetch_optional(pool)
    .await?;

    Ok(teacher)
}
