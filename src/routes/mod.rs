//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과, 이들을 URL에 연결하는 라우터를 모아둔 모듈입니다.
//!
//! 각 하위 모듈:
//! - `accounts`: 계정 생성 및 역할 조회
//! - `academics`: 학급·과목·학기
//! - `health`: 서버 상태 확인
//! - `lessons`: 수업 일정 생성, 조회, 완료 처리, 삭제

pub mod academics;
pub mod accounts;
pub mod health;
pub mod lessons;

use axum::{
    routing::{delete, get, post},
    Router,
};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

/// `/api/v1` 아래에 중첩될 API 라우터를 만듭니다.
///
/// 미들웨어(CORS, TraceLayer)는 main.rs에서 붙입니다.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/accounts", post(accounts::create_account))
        .route("/accounts/{id}", get(accounts::get_account))
        .route(
            "/classes",
            get(academics::list_classes).post(academics::create_class),
        )
        .route("/classes/{id}", get(academics::get_class))
        .route("/classes/{id}/lessons", get(lessons::list_class_lessons))
        .route(
            "/classes/{id}/subjects/{subject_id}/lessons",
            delete(lessons::delete_class_subject_lessons),
        )
        .route(
            "/subjects",
            get(academics::list_subjects).post(academics::create_subject),
        )
        .route("/subjects/{id}", get(academics::get_subject))
        .route(
            "/semesters",
            get(academics::list_semesters).post(academics::create_semester),
        )
        .route("/semesters/{id}", get(academics::get_semester))
        .route("/lessons/schedule", post(lessons::schedule_lessons))
        .route(
            "/lessons/{id}",
            get(lessons::get_lesson)
                .patch(lessons::complete_lesson)
                .delete(lessons::delete_lesson),
        )
        .route("/health", get(health::health_check))
        .with_state(state)
}

/// 전체 애플리케이션 라우터 (`/api/v1` 접두사 포함)
pub fn app(state: AppState) -> Router {
    Router::new().nest("/api/v1", api_router(state))
}
