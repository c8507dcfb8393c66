//! # 수업(Lesson) 데이터베이스 쿼리 모듈
//!
//! 일정 전개가 사용하는 충돌 조회(`find_conflicting_lesson`)와 일괄 삽입(`insert_lessons`)은
//! 트랜잭션 안에서 호출되므로 풀 대신 `&mut SqliteConnection`을 받습니다.
//! 트랜잭션 `tx`에서는 `&mut *tx`로 넘기면 됩니다.
//!
//! 나머지 조회·수정·삭제 함수는 다른 모듈과 같이 `&SqlitePool`을 받습니다.

use crate::error::AppError;
use crate::ids::BinaryId;
use crate::models::{Lesson, NewLesson};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

/// 한 번의 INSERT 문에 담는 최대 행 수.
/// SQLite의 바인딩 파라미터 개수 제한(32766)을 넘지 않도록 나눠서 삽입합니다.
const INSERT_CHUNK_ROWS: usize = 1000;

const LESSON_COLUMNS: &str = "id, date, start_time, end_time, is_completed, description, \
     teacher_id, class_id, subject_id, semester_id, created_at, updated_at";

pub async fn get_lesson(pool: &SqlitePool, id: &BinaryId) -> Result<Option<Lesson>, AppError> {
    let sql = format!("SELECT {} FROM lessons WHERE id = ?", LESSON_COLUMNS);
    let lesson = sqlx::query_as::<_, Lesson>(&sql)
        .bind(id.as_bytes())
        .fetch_optional(pool)
        .await?;

    Ok(lesson)
}

/// 학급의 모든 수업을 날짜·시작 시각 순으로 조회합니다.
pub async fn list_lessons_for_class(
    pool: &SqlitePool,
    class_id: &BinaryId,
) -> Result<Vec<Lesson>, AppError> {
    let sql = format!(
        "SELECT {} FROM lessons WHERE class_id = ? ORDER BY date, start_time",
        LESSON_COLUMNS
    );
    let lessons = sqlx::query_as::<_, Lesson>(&sql)
        .bind(class_id.as_bytes())
        .fetch_all(pool)
        .await?;

    Ok(lessons)
}

/// 정확히 같은 (날짜, 시작, 종료) 조합의 수업이 이미 있는지 조회합니다.
///
/// 학급·교사와 무관하게 전역으로 검사합니다.
pub async fn find_conflicting_lesson(
    conn: &mut SqliteConnection,
    date: NaiveDate,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<Option<Lesson>, AppError> {
    let sql = format!(
        "SELECT {} FROM lessons WHERE date = ? AND start_time = ? AND end_time = ? LIMIT 1",
        LESSON_COLUMNS
    );
    let lesson = sqlx::query_as::<_, Lesson>(&sql)
        .bind(date)
        .bind(start_time)
        .bind(end_time)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(lesson)
}

/// 새 수업들을 일괄 삽입하고 삽입된 행 수를 반환합니다.
///
/// 모든 행은 `is_completed = false`, `description = NULL`로 생성됩니다.
/// 원자성은 호출자의 트랜잭션이 보장합니다.
pub async fn insert_lessons(
    conn: &mut SqliteConnection,
    lessons: &[NewLesson],
) -> Result<u64, sqlx::Error> {
    let mut inserted = 0;

    // chunks(): 슬라이스를 최대 N개씩 잘라 순회합니다. 빈 슬라이스면 한 번도 돌지 않습니다.
    for chunk in lessons.chunks(INSERT_CHUNK_ROWS) {
        // QueryBuilder: 행 수가 실행 시점에 정해지는 SQL을 안전하게 조립하는 도구.
        // push_values는 "VALUES (?, ?, ...), (?, ?, ...)" 부분을 만들고,
        // push_bind로 넣은 값은 문자열로 이어 붙이지 않고 바인딩 파라미터로 전달됩니다.
        let mut builder = QueryBuilder::<Sqlite>::new(
            "INSERT INTO lessons (id, date, start_time, end_time, is_completed, \
             teacher_id, class_id, subject_id, semester_id) ",
        );
        builder.push_values(chunk, |mut row, lesson| {
            row.push_bind(lesson.id.as_bytes().to_vec())
                .push_bind(lesson.date)
                .push_bind(lesson.start_time)
                .push_bind(lesson.end_time)
                .push_bind(false)
                .push_bind(lesson.teacher_id.as_bytes().to_vec())
                .push_bind(lesson.class_id.as_bytes().to_vec())
                .push_bind(lesson.subject_id.as_bytes().to_vec())
                .push_bind(lesson.semester_id.as_bytes().to_vec());
        });

        // `&mut *conn`: 재대여(reborrow). conn을 루프 안에서 여러 번 쓰기 위해 매번 새로 빌립니다.
        let result = builder.build().execute(&mut *conn).await?;
        inserted += result.rows_affected();
    }

    Ok(inserted)
}

/// 수업을 완료로 표시하고 설명을 기록합니다.
///
/// - `Ok(Some(Lesson))`: 수정된 수업
/// - `Ok(None)`: 해당 ID의 수업이 없음
pub async fn complete_lesson(
    pool: &SqlitePool,
    id: &BinaryId,
    description: Option<&str>,
) -> Result<Option<Lesson>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE lessons
        SET is_completed = 1,
            description = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE id = ?
        "#,
    )
    .bind(description)
    .bind(id.as_bytes())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_lesson(pool, id).await
}

pub async fn delete_lesson(pool: &SqlitePool, id: &BinaryId) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM lessons WHERE id = ?")
        .bind(id.as_bytes())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// 특정 학급·과목 조합의 수업을 모두 삭제하고 삭제된 행 수를 반환합니다.
pub async fn delete_lessons_for_class_subject(
    pool: &SqlitePool,
    class_id: &BinaryId,
    subject_id: &BinaryId,
) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM lessons WHERE class_id = ? AND subject_id = ?")
        .bind(class_id.as_bytes())
        .bind(subject_id.as_bytes())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
