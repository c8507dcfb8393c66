//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형: 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 `{ "error": { "code", "message" } }` HTTP 응답으로 자동 변환
//!
//! | 분류 | variant | HTTP |
//! |------|---------|------|
//! | 참조 대상 없음 | `NotFound` | 404 |
//! | 잘못된 입력/기간 | `BadRequest`, `InvalidId` | 400 |
//! | 수업 시간 충돌 | `Conflict` | 409 |
//! | 예기치 못한 오류 | `Database`, `Internal` | 500 |

use crate::ids::IdError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청이 참조한 리소스를 찾을 수 없음 (HTTP 404)
    /// 어떤 엔티티가 없는지 구분할 수 있도록 엔티티 이름을 담습니다. (예: "teacher")
    #[error("{0} not found")]
    NotFound(&'static str),

    /// 잘못된 요청 (HTTP 400): 기간 역전, 학기 범위 이탈, 잘못된 일정 패턴 등
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 식별자 텍스트를 디코딩할 수 없음 (HTTP 400)
    #[error(transparent)]
    InvalidId(#[from] IdError),

    /// 리소스 충돌 (HTTP 409): 같은 날짜·시간대에 이미 수업이 있는 경우
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from] 덕분에 sqlx 함수 결과에 `?`를 쓰면 자동으로 AppError::Database로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// HTTP 상태 코드와 에러 코드 문자열
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::InvalidId(_) => (StatusCode::BAD_REQUEST, "invalid_id"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
        }
    }
}

impl IntoResponse for AppError {
    /// 내부 에러(Database, Internal)는 실제 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code) = self.status();

        let message = match self {
            AppError::NotFound(entity) => {
                // "teacher" → "Teacher not found"
                let mut chars = entity.chars();
                match chars.next() {
                    Some(first) => format!("{}{} not found", first.to_uppercase(), chars.as_str()),
                    None => "Resource not found".to_string(),
                }
            }
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::InvalidId(ref e) => e.to_string(),
            AppError::Conflict(ref msg) => msg.clone(),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                "A database error occurred".to_string()
            }
        };

        // 결과: { "error": { "code": "not_found", "message": "Teacher not found" } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
