//! # 수업(Lesson) 모델
//!
//! 수업 행은 일정 전개(`services::schedule`)가 한 번에 일괄 생성합니다.
//! 이후에는 완료 처리(설명 추가)와 삭제만 가능합니다.

use crate::ids::BinaryId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// `lessons` 테이블 한 행
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Lesson {
    #[sqlx(try_from = "Vec<u8>")]
    pub id: BinaryId,
    /// 수업 날짜 (시각 없음)
    pub date: NaiveDate,
    /// 시작 시각 (UTC, 초/밀리초는 항상 0)
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_completed: bool,
    pub description: Option<String>,
    #[sqlx(try_from = "Vec<u8>")]
    pub teacher_id: BinaryId,
    #[sqlx(try_from = "Vec<u8>")]
    pub class_id: BinaryId,
    #[sqlx(try_from = "Vec<u8>")]
    pub subject_id: BinaryId,
    #[sqlx(try_from = "Vec<u8>")]
    pub semester_id: BinaryId,
    pub created_at: String,
    pub updated_at: String,
}

/// 일괄 삽입할 새 수업
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLesson {
    pub id: BinaryId,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub teacher_id: BinaryId,
    pub class_id: BinaryId,
    pub subject_id: BinaryId,
    pub semester_id: BinaryId,
}

/// 주간 반복 일정 패턴 (요청 입력, 저장하지 않음)
///
/// 숫자 필드는 범위 검사를 직접 하기 위해 넓은 정수형으로 받습니다.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPattern {
    /// 0 = 일요일 … 6 = 토요일
    pub day_of_week: i64,
    /// "HH:MM" (24시간, 0 채움)
    pub start_time: String,
    pub end_time: String,
    /// 몇 주마다 반복하는지 (1 이상)
    pub frequency: i64,
}

/// `POST /lessons/schedule` 요청 본문
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleLessonsRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub schedules: Vec<WeeklyPattern>,
    pub teacher_id: String,
    pub class_id: String,
    pub subject_id: String,
    pub semester_id: String,
}

/// `PATCH /lessons/{id}` 요청 본문: 수업을 완료로 표시하고 설명을 남깁니다.
#[derive(Debug, Deserialize)]
pub struct CompleteLessonRequest {
    pub description: Option<String>,
}
