//! # 학사 메타데이터 쿼리 모듈
//!
//! `classes`, `subjects`, `semesters` 테이블의 생성·조회 쿼리입니다.
//! 일정 전개는 여기의 `get_*` 함수로 참조 대상의 존재를 확인합니다.

use crate::error::AppError;
use crate::ids::BinaryId;
use crate::models::*;
use sqlx::SqlitePool;

// ── 학급(Class) ──

pub async fn list_classes(pool: &SqlitePool) -> Result<Vec<Class>, AppError> {
    let classes = sqlx::query_as::<_, Class>(
        "SELECT id, name, created_at, updated_at FROM classes ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(classes)
}

pub async fn get_class(pool: &SqlitePool, id: &BinaryId) -> Result<Option<Class>, AppError> {
    let class = sqlx::query_as::<_, Class>(
        "SELECT id, name, created_at, updated_at FROM classes WHERE id = ?",
    )
    .bind(id.as_bytes())
    .fetch_optional(pool)
    .await?;

    Ok(class)
}

pub async fn create_class(pool: &SqlitePool, name: &str) -> Result<Class, AppError> {
    let id = BinaryId::new();

    sqlx::query("INSERT INTO classes (id, name) VALUES (?, ?)")
        .bind(id.as_bytes())
        .bind(name)
        .execute(pool)
        .await?;

    get_class(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created class".to_string()))
}

// ── 과목(Subject) ──

pub async fn list_subjects(pool: &SqlitePool) -> Result<Vec<Subject>, AppError> {
    let subjects = sqlx::query_as::<_, Subject>(
        "SELECT id, name, created_at, updated_at FROM subjects ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(subjects)
}

pub async fn get_subject(pool: &SqlitePool, id: &BinaryId) -> Result<Option<Subject>, AppError> {
    let subject = sqlx::query_as::<_, Subject>(
        "SELECT id, name, created_at, updated_at FROM subjects WHERE id = ?",
    )
    .bind(id.as_bytes())
    .fetch_optional(pool)
    .await?;

    Ok(subject)
}

pub async fn create_subject(pool: &SqlitePool, name: &str) -> Result<Subject, AppError> {
    let id = BinaryId::new();

    sqlx::query("INSERT INTO subjects (id, name) VALUES (?, ?)")
        .bind(id.as_bytes())
        .bind(name)
        .execute(pool)
        .await?;

    get_subject(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created subject".to_string()))
}

// ── 학기(Semester) ──

pub async fn list_semesters(pool: &SqlitePool) -> Result<Vec<Semester>, AppError> {
    let semesters = sqlx::query_as::<_, Semester>(
        r#"
        SELECT id, name, start_date, end_date, created_at, updated_at
        FROM semesters
        ORDER BY start_date DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(semesters)
}

pub async fn get_semester(pool: &SqlitePool, id: &BinaryId) -> Result<Option<Semester>, AppError> {
    let semester = sqlx::query_as::<_, Semester>(
        r#"
        SELECT id, name, start_date, end_date, created_at, updated_at
        FROM semesters
        WHERE id = ?
        "#,
    )
    .bind(id.as_bytes())
    .fetch_optional(pool)
    .await?;

    Ok(semester)
}

pub async fn create_semester(
    pool: &SqlitePool,
    req: &CreateSemesterRequest,
) -> Result<Semester, AppError> {
    let id = BinaryId::new();

    sqlx::query(
        r#"
        INSERT INTO semesters (id, name, start_date, end_date)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(id.as_bytes())
    .bind(&req.name)
    .bind(req.start_date)
    .bind(req.end_date)
    .execute(pool)
    .await?;

    get_semester(pool, &id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created semester".to_string()))
}
