//! # 계정(Account) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/v1/accounts`      → 역할을 지정해 계정 생성
//! - `GET  /api/v1/accounts/{id}` → 계정과 역할 조회
//!
//! 인증·비밀번호 처리는 이 서비스 밖에서 이루어지므로 여기서는 프로필만 다룹니다.

use crate::{db, error::AppError, ids::BinaryId, models::*};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::AppState;

/// `POST /accounts`: `{ "role": "teacher", "first_name", "last_name", "email" }`
pub async fn create_account(
    State(state): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<Account>), AppError> {
    if req.first_name.trim().is_empty() || req.last_name.trim().is_empty() {
        return Err(AppError::BadRequest("Name cannot be empty".to_string()));
    }
    if !req.email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }

    // 이메일은 역할을 넘나들어 하나의 계정에만 쓸 수 있습니다.
    if db::find_account_by_email(&state.pool, &req.email).await?.is_some() {
        return Err(AppError::Conflict("Email already exists".to_string()));
    }

    let account = db::create_account(&state.pool, &req).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// `GET /accounts/{id}`: 역할 테이블을 차례로 찾지 않고 통합 뷰 한 번으로 조회합니다.
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Account>, AppError> {
    let id = BinaryId::parse(&id)?;
    let account = db::resolve_account(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound("account"))?;
    Ok(Json(account))
}
