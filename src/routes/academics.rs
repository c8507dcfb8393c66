//! # 학급·과목·학기 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | GET/POST | /api/v1/classes | 학급 목록 / 생성 |
//! | GET | /api/v1/classes/{id} | 학급 조회 |
//! | GET/POST | /api/v1/subjects | 과목 목록 / 생성 |
//! | GET | /api/v1/subjects/{id} | 과목 조회 |
//! | GET/POST | /api/v1/semesters | 학기 목록 / 생성 |
//! | GET | /api/v1/semesters/{id} | 학기 조회 |

use crate::{db, error::AppError, ids::BinaryId, models::*};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::AppState;

fn required_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name cannot be empty".to_string()));
    }
    Ok(name)
}

// ── 학급 ──

pub async fn list_classes(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let classes = db::list_classes(&state.pool).await?;
    Ok(Json(json!({ "classes": classes })))
}

pub async fn create_class(
    State(state): State<AppState>,
    Json(req): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<Class>), AppError> {
    let class = db::create_class(&state.pool, required_name(&req.name)?).await?;
    Ok((StatusCode::CREATED, Json(class)))
}

pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Class>, AppError> {
    let id = BinaryId::parse(&id)?;
    let class = db::get_class(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound("class"))?;
    Ok(Json(class))
}

// ── 과목 ──

pub async fn list_subjects(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let subjects = db::list_subjects(&state.pool).await?;
    Ok(Json(json!({ "subjects": subjects })))
}

pub async fn create_subject(
    State(state): State<AppState>,
    Json(req): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<Subject>), AppError> {
    let subject = db::create_subject(&state.pool, required_name(&req.name)?).await?;
    Ok((StatusCode::CREATED, Json(subject)))
}

pub async fn get_subject(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Subject>, AppError> {
    let id = BinaryId::parse(&id)?;
    let subject = db::get_subject(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound("subject"))?;
    Ok(Json(subject))
}

// ── 학기 ──

pub async fn list_semesters(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let semesters = db::list_semesters(&state.pool).await?;
    Ok(Json(json!({ "semesters": semesters })))
}

/// `POST /semesters`: `{ "name", "start_date": "2024-09-01", "end_date": "2025-01-31" }`
pub async fn create_semester(
    State(state): State<AppState>,
    Json(req): Json<CreateSemesterRequest>,
) -> Result<(StatusCode, Json<Semester>), AppError> {
    let name = required_name(&req.name)?.to_string();
    if req.start_date >= req.end_date {
        return Err(AppError::BadRequest(
            "start_date must be before end_date".to_string(),
        ));
    }

    // 학급·과목과 같이 앞뒤 공백을 제거한 이름으로 저장
    let req = CreateSemesterRequest { name, ..req };
    let semester = db::create_semester(&state.pool, &req).await?;
    Ok((StatusCode::CREATED, Json(semester)))
}

pub async fn get_semester(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Semester>, AppError> {
    let id = BinaryId::parse(&id)?;
    let semester = db::get_semester(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound("semester"))?;
    Ok(Json(semester))
}
