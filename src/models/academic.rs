//! # 학사 메타데이터 모델
//!
//! 학급, 과목, 학기. 수업(Lesson)은 항상 이 셋과 교사 한 명을 참조합니다.

use crate::ids::BinaryId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Class {
    #[sqlx(try_from = "Vec<u8>")]
    pub id: BinaryId,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Subject {
    #[sqlx(try_from = "Vec<u8>")]
    pub id: BinaryId,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 학기. 이 학기에 속한 수업의 날짜는 `[start_date, end_date]` 안에 있어야 합니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Semester {
    #[sqlx(try_from = "Vec<u8>")]
    pub id: BinaryId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: String,
    pub updated_at: String,
}

impl Semester {
    /// 날짜가 학기 범위 안에 있는지 (양 끝 포함)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateSemesterRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
