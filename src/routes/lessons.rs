//! # 수업(Lesson) 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/v1/lessons/schedule | `schedule_lessons` | 주간 패턴으로 수업 일괄 생성 |
//! | GET | /api/v1/classes/{id}/lessons | `list_class_lessons` | 학급의 수업 목록 |
//! | GET | /api/v1/lessons/{id} | `get_lesson` | 수업 조회 |
//! | PATCH | /api/v1/lessons/{id} | `complete_lesson` | 완료 처리 + 설명 |
//! | DELETE | /api/v1/lessons/{id} | `delete_lesson` | 수업 삭제 |
//! | DELETE | /api/v1/classes/{id}/subjects/{subject_id}/lessons | `delete_class_subject_lessons` | 학급·과목 수업 일괄 삭제 |

use crate::{db, error::AppError, ids::BinaryId, models::*, services};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::AppState;

/// `POST /lessons/schedule`: 일정 전개를 실행합니다.
///
/// 성공: `201 { "count": 삽입된 수업 수 }`
/// 실패: 404(참조 대상 없음), 400(잘못된 기간/패턴/식별자), 409(시간대 충돌)
pub async fn schedule_lessons(
    State(state): State<AppState>,
    Json(req): Json<ScheduleLessonsRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let count = services::schedule_lessons(&state.pool, &req).await?;
    Ok((StatusCode::CREATED, Json(json!({ "count": count }))))
}

pub async fn list_class_lessons(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let class_id = BinaryId::parse(&class_id)?;

    // 없는 학급이면 빈 배열 대신 404
    db::get_class(&state.pool, &class_id)
        .await?
        .ok_or(AppError::NotFound("class"))?;

    let lessons = db::list_lessons_for_class(&state.pool, &class_id).await?;
    Ok(Json(json!({ "lessons": lessons })))
}

pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Lesson>, AppError> {
    let id = BinaryId::parse(&id)?;
    let lesson = db::get_lesson(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound("lesson"))?;
    Ok(Json(lesson))
}

/// `PATCH /lessons/{id}` + `{ "description": "..." }`
pub async fn complete_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<CompleteLessonRequest>,
) -> Result<Json<Lesson>, AppError> {
    let id = BinaryId::parse(&id)?;
    let lesson = db::complete_lesson(&state.pool, &id, req.description.as_deref())
        .await?
        .ok_or(AppError::NotFound("lesson"))?;
    Ok(Json(lesson))
}

pub async fn delete_lesson(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = BinaryId::parse(&id)?;
    if !db::delete_lesson(&state.pool, &id).await? {
        return Err(AppError::NotFound("lesson"));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// 학급·과목 조합의 수업을 모두 삭제합니다. 응답: `{ "count": 삭제된 수 }`
pub async fn delete_class_subject_lessons(
    State(state): State<AppState>,
    Path((class_id, subject_id)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    let class_id = BinaryId::parse(&class_id)?;
    let subject_id = BinaryId::parse(&subject_id)?;

    db::get_class(&state.pool, &class_id)
        .await?
        .ok_or(AppError::NotFound("class"))?;
    db::get_subject(&state.pool, &subject_id)
        .await?
        .ok_or(AppError::NotFound("subject"))?;

    let count = db::delete_lessons_for_class_subject(&state.pool, &class_id, &subject_id).await?;
    tracing::info!(count, class_id = %class_id, subject_id = %subject_id, "deleted lessons");
    Ok(Json(json!({ "count": count })))
}
