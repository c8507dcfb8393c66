//! 통합 테스트 공용 도우미: 메모리 DB 풀과 기본 시드 데이터

#![allow(dead_code)]

use chrono::NaiveDate;
use school_backend::{
    db,
    models::{
        Account, AccountRole, CreateAccountRequest, CreateSemesterRequest, ScheduleLessonsRequest,
        WeeklyPattern,
    },
};
use school_backend::ids::BinaryId;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

/// 마이그레이션이 적용된 메모리 SQLite 풀
///
/// 메모리 DB는 연결마다 따로 생기므로 연결을 하나로 고정하고 끊지 않습니다.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    db::migrate(&pool).await.expect("run migrations");
    pool
}

/// 여러 연결이 동시에 쓰는 상황을 재현하기 위한 임시 파일 DB 풀
///
/// 메모리 DB와 달리 연결들이 같은 파일을 공유합니다. 테스트 끝에 [`remove_db`]로 지웁니다.
pub async fn file_pool(max_connections: u32) -> (SqlitePool, PathBuf) {
    let path = std::env::temp_dir().join(format!("school-backend-{}.db", BinaryId::new()));
    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .expect("open file-backed sqlite");
    db::migrate(&pool).await.expect("run migrations");
    (pool, path)
}

pub async fn remove_db(pool: SqlitePool, path: &Path) {
    pool.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let mut file = path.as_os_str().to_owned();
        file.push(suffix);
        let _ = std::fs::remove_file(file);
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn weekly(day_of_week: i64, start: &str, end: &str, frequency: i64) -> WeeklyPattern {
    WeeklyPattern {
        day_of_week,
        start_time: start.to_string(),
        end_time: end.to_string(),
        frequency,
    }
}

/// 일정 생성에 필요한 참조 데이터 (교사, 학급, 과목, 학기)
#[derive(Clone)]
pub struct Seed {
    pub teacher_id: String,
    pub class_id: String,
    pub subject_id: String,
    pub semester_id: String,
}

impl Seed {
    /// 2024-09-01 ~ 2024-09-15 구간에 주어진 패턴으로 일정 요청을 만듭니다.
    pub fn request(&self, schedules: Vec<WeeklyPattern>) -> ScheduleLessonsRequest {
        self.request_between("2024-09-01", "2024-09-15", schedules)
    }

    pub fn request_between(
        &self,
        start: &str,
        end: &str,
        schedules: Vec<WeeklyPattern>,
    ) -> ScheduleLessonsRequest {
        ScheduleLessonsRequest {
            start_date: date(start),
            end_date: date(end),
            schedules,
            teacher_id: self.teacher_id.clone(),
            class_id: self.class_id.clone(),
            subject_id: self.subject_id.clone(),
            semester_id: self.semester_id.clone(),
        }
    }
}

pub async fn create_account(pool: &SqlitePool, role: AccountRole, email: &str) -> Account {
    db::create_account(
        pool,
        &CreateAccountRequest {
            role,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
        },
    )
    .await
    .expect("create account")
}

/// 2024-09-01 ~ 2025-01-31 학기와 교사·학급·과목을 하나씩 만듭니다.
pub async fn seed(pool: &SqlitePool) -> Seed {
    let teacher = create_account(pool, AccountRole::Teacher, "teacher@school.test").await;
    let class = db::create_class(pool, "7B").await.expect("create class");
    let subject = db::create_subject(pool, "Mathematics")
        .await
        .expect("create subject");
    let semester = db::create_semester(
        pool,
        &CreateSemesterRequest {
            name: "Fall 2024".to_string(),
            start_date: date("2024-09-01"),
            end_date: date("2025-01-31"),
        },
    )
    .await
    .expect("create semester");

    Seed {
        teacher_id: teacher.profile().id.to_string(),
        class_id: class.id.to_string(),
        subject_id: subject.id.to_string(),
        semester_id: semester.id.to_string(),
    }
}

pub async fn lesson_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM lessons")
        .fetch_one(pool)
        .await
        .expect("count lessons")
}
