//! # 수업 일정 전개(Lesson Schedule Expander)
//!
//! 주간 반복 패턴(요일, 시작/종료 시각, 반복 주기)을 학기 기간에 걸쳐
//! 날짜가 정해진 수업 행으로 펼치고, 시간대가 겹치는 일정은 통째로 거부합니다.
//!
//! ## 처리 순서
//! ```text
//! 1. 식별자 디코딩            → 400 invalid_id
//! 2. 교사 → 학급 → 과목 → 학기 존재 확인 → 404 (없는 엔티티 이름 포함)
//! 3. 기간 검사 (start < end, 둘 다 학기 범위 안) → 400
//! 4. 패턴 검사 후 전개
//! 5. 충돌 검사 (요청 내부 중복 + 기존 수업) → 409, 아무것도 쓰지 않음
//! 6. 일괄 삽입 → 삽입된 행 수
//! ```
//! 5와 6은 하나의 트랜잭션 안에서 실행됩니다. `lessons` 테이블의
//! `UNIQUE (date, start_time, end_time)` 제약에 걸리면 역시 409로 보고하고 롤백합니다.
//!
//! ## 전개 규칙 (패턴마다 독립적으로)
//! - 후보 날짜는 `start_date + 1일`부터 시작합니다. 시작일 자체는 절대 후보가 아닙니다.
//! - 후보 요일이 패턴 요일과 다르면 `(패턴요일 - 후보요일 + 7) % 7`일만큼 앞으로 당깁니다.
//! - 당긴 날짜가 여전히 `end_date`보다 앞이면 수업 하나를 만듭니다. (`end_date` 제외)
//! - 그다음 후보는 현재 위치에서 `frequency × 7`일 뒤입니다.
//!
//! 모든 시각은 UTC 벽시계 기준이며 초/밀리초는 항상 0입니다.
//! 요일 번호는 0 = 일요일 … 6 = 토요일입니다.

use crate::{
    db,
    error::AppError,
    ids::BinaryId,
    models::{NewLesson, ScheduleLessonsRequest, Semester, WeeklyPattern},
};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use std::collections::HashSet;

/// 검증을 마친 주간 패턴
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPattern {
    /// 0 = 일요일 … 6 = 토요일
    pub weekday: u32,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// 반복 주기(주 단위), 1 이상
    pub frequency: u32,
}

impl TryFrom<&WeeklyPattern> for SlotPattern {
    type Error = AppError;

    fn try_from(pattern: &WeeklyPattern) -> Result<Self, Self::Error> {
        if !(0..=6).contains(&pattern.day_of_week) {
            return Err(AppError::BadRequest(format!(
                "dayOfWeek must be between 0 (Sunday) and 6 (Saturday), got {}",
                pattern.day_of_week
            )));
        }
        if pattern.frequency < 1 || pattern.frequency > i64::from(u32::MAX) {
            return Err(AppError::BadRequest(format!(
                "frequency must be a positive number of weeks, got {}",
                pattern.frequency
            )));
        }

        let start = parse_wall_clock(&pattern.start_time)?;
        let end = parse_wall_clock(&pattern.end_time)?;
        if start >= end {
            return Err(AppError::BadRequest(format!(
                "startTime {} must be before endTime {}",
                pattern.start_time, pattern.end_time
            )));
        }

        Ok(Self {
            weekday: pattern.day_of_week as u32,
            start,
            end,
            frequency: pattern.frequency as u32,
        })
    }
}

/// 패턴 하나가 만들어 낸 구체적인 수업 한 건
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    /// 요청의 `schedules` 배열에서 이 수업을 만든 패턴의 위치
    pub pattern_index: usize,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Occurrence {
    /// 충돌 판정에 쓰는 (날짜, 시작, 종료) 조합
    pub fn slot(&self) -> (NaiveDate, DateTime<Utc>, DateTime<Utc>) {
        (self.date, self.start_time, self.end_time)
    }
}

/// `"HH:MM"`(24시간, 0 채움)을 초가 0인 시각으로 파싱합니다.
pub fn parse_wall_clock(text: &str) -> Result<NaiveTime, AppError> {
    let invalid = || AppError::BadRequest(format!("time '{}' must be in HH:MM format", text));

    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[2] == b':'
        && bytes[..2].iter().chain(&bytes[3..]).all(u8::is_ascii_digit);
    if !well_formed {
        return Err(invalid());
    }

    let hour: u32 = text[..2].parse().map_err(|_| invalid())?;
    let minute: u32 = text[3..].parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

/// 요청 기간이 뒤집히지 않았고 학기 범위(양 끝 포함) 안에 있는지 확인합니다.
pub fn validate_range(
    semester: &Semester,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), AppError> {
    if start_date >= end_date {
        return Err(AppError::BadRequest(format!(
            "startDate {} must be before endDate {}",
            start_date, end_date
        )));
    }
    if !semester.contains(start_date) || !semester.contains(end_date) {
        return Err(AppError::BadRequest(format!(
            "date range {}..{} must lie within semester {}..{}",
            start_date, end_date, semester.start_date, semester.end_date
        )));
    }
    Ok(())
}

/// 패턴 하나를 `(start_date, end_date)` 구간의 수업들로 펼칩니다. 결과는 날짜순입니다.
pub fn expand_pattern(
    pattern: &SlotPattern,
    pattern_index: usize,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Vec<Occurrence> {
    let mut occurrences = Vec::new();
    let step = Days::new(7 * u64::from(pattern.frequency));

    // let-else: 패턴이 맞지 않으면(None) else 블록에서 바로 반환합니다.
    // succ_opt()는 다음 날짜를 돌려주며, 달력의 끝(NaiveDate::MAX)에서만 None입니다.
    let Some(mut candidate) = start_date.succ_opt() else {
        return occurrences;
    };

    while candidate < end_date {
        let weekday = candidate.weekday().num_days_from_sunday();
        if weekday != pattern.weekday {
            let shift = (pattern.weekday + 7 - weekday) % 7;
            candidate = match candidate.checked_add_days(Days::new(u64::from(shift))) {
                Some(date) => date,
                None => break,
            };
        }

        if candidate < end_date {
            occurrences.push(Occurrence {
                pattern_index,
                date: candidate,
                start_time: candidate.and_time(pattern.start).and_utc(),
                end_time: candidate.and_time(pattern.end).and_utc(),
            });
        }

        candidate = match candidate.checked_add_days(step) {
            Some(date) => date,
            None => break,
        };
    }

    occurrences
}

/// 모든 패턴을 입력 순서대로 펼칩니다 (패턴 내부는 날짜순).
pub fn expand_patterns(
    patterns: &[SlotPattern],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Vec<Occurrence> {
    patterns
        .iter()
        .enumerate()
        .flat_map(|(index, pattern)| expand_pattern(pattern, index, start_date, end_date))
        .collect()
}

/// 요청 안의 패턴 목록을 검증합니다. 빈 목록은 거부합니다.
pub fn parse_patterns(schedules: &[WeeklyPattern]) -> Result<Vec<SlotPattern>, AppError> {
    if schedules.is_empty() {
        return Err(AppError::BadRequest(
            "schedules must contain at least one pattern".to_string(),
        ));
    }
    schedules.iter().map(SlotPattern::try_from).collect()
}

/// 첫 번째 충돌 수업을 찾습니다.
///
/// 같은 요청에서 앞서 만든 수업과 겹치거나, 이미 저장된 수업과 겹치면 충돌입니다.
pub async fn find_first_conflict<'a>(
    conn: &mut SqliteConnection,
    occurrences: &'a [Occurrence],
) -> Result<Option<&'a Occurrence>, AppError> {
    // HashSet::insert는 이미 있던 값이면 false를 반환하므로, 요청 내부 중복을 한 번에 판별합니다.
    let mut seen = HashSet::with_capacity(occurrences.len());

    for occurrence in occurrences {
        if !seen.insert(occurrence.slot()) {
            return Ok(Some(occurrence));
        }
        let existing = db::find_conflicting_lesson(
            conn,
            occurrence.date,
            occurrence.start_time,
            occurrence.end_time,
        )
        .await?;
        if existing.is_some() {
            return Ok(Some(occurrence));
        }
    }

    Ok(None)
}

/// 수업 행들을 삽입하고, `UNIQUE (date, start_time, end_time)` 위반은 충돌(409)로 바꿉니다.
///
/// 충돌 검사를 통과했더라도 제약이 최종 방어선 역할을 합니다.
pub async fn insert_scheduled_lessons(
    conn: &mut SqliteConnection,
    rows: &[NewLesson],
) -> Result<u64, AppError> {
    db::insert_lessons(conn, rows).await.map_err(|e| match e {
        // `ref db_err`: e를 이동(move)하지 않고 빌려서 검사합니다.
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => AppError::Conflict(
            "A lesson is already scheduled in one of the requested time slots".to_string(),
        ),
        other => AppError::Database(other),
    })
}

fn conflict_message(occurrence: &Occurrence) -> String {
    format!(
        "A lesson is already scheduled on {} from {} to {}",
        occurrence.date,
        occurrence.start_time.format("%H:%M"),
        occurrence.end_time.format("%H:%M"),
    )
}

/// 주간 패턴으로 수업을 일괄 생성하고 생성된 수를 반환합니다.
///
/// 전부 성공하거나 아무것도 쓰지 않습니다.
pub async fn schedule_lessons(
    pool: &SqlitePool,
    req: &ScheduleLessonsRequest,
) -> Result<u64, AppError> {
    let teacher_id = BinaryId::parse(&req.teacher_id)?;
    let class_id = BinaryId::parse(&req.class_id)?;
    let subject_id = BinaryId::parse(&req.subject_id)?;
    let semester_id = BinaryId::parse(&req.semester_id)?;

    // 참조 대상 존재 확인 (순서 고정: 교사 → 학급 → 과목 → 학기)
    db::find_teacher(pool, &teacher_id)
        .await?
        .ok_or(AppError::NotFound("teacher"))?;
    db::get_class(pool, &class_id)
        .await?
        .ok_or(AppError::NotFound("class"))?;
    db::get_subject(pool, &subject_id)
        .await?
        .ok_or(AppError::NotFound("subject"))?;
    let semester = db::get_semester(pool, &semester_id)
        .await?
        .ok_or(AppError::NotFound("semester"))?;

    validate_range(&semester, req.start_date, req.end_date)?;
    let patterns = parse_patterns(&req.schedules)?;
    let occurrences = expand_patterns(&patterns, req.start_date, req.end_date);

    // 트랜잭션 시작
    // 기본 `begin()`은 DEFERRED 트랜잭션이라 첫 쓰기 시점에야 쓰기 잠금을 잡습니다.
    // 그러면 동시에 들어온 두 요청이 모두 충돌 검사를 통과한 뒤 한쪽이 SQLITE_BUSY로 실패합니다.
    // IMMEDIATE로 시작하면 쓰기 잠금을 먼저 잡으므로 검사와 삽입이 요청 단위로 직렬화되고,
    // 뒤에 온 요청은 잠금을 기다렸다가(busy_timeout) 앞 요청이 넣은 수업을 보고 409를 받습니다.
    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    if let Some(occurrence) = find_first_conflict(&mut *tx, &occurrences).await? {
        tracing::warn!(
            pattern = occurrence.pattern_index,
            date = %occurrence.date,
            "rejecting lesson schedule: time slot already taken"
        );
        // tx는 커밋 없이 drop되면서 롤백됩니다.
        return Err(AppError::Conflict(conflict_message(occurrence)));
    }

    let rows: Vec<NewLesson> = occurrences
        .iter()
        .map(|occurrence| NewLesson {
            id: BinaryId::new(),
            date: occurrence.date,
            start_time: occurrence.start_time,
            end_time: occurrence.end_time,
            teacher_id,
            class_id,
            subject_id,
            semester_id,
        })
        .collect();

    // `&mut *tx`: Transaction을 역참조해 안쪽의 SqliteConnection을 빌려줍니다.
    // 같은 연결에서 실행되므로 충돌 검사와 삽입이 하나의 트랜잭션에 묶입니다.
    let inserted = insert_scheduled_lessons(&mut *tx, &rows).await?;

    // commit 전에 `?`로 빠져나가면 tx가 drop되면서 자동으로 롤백됩니다.
    tx.commit().await?;

    tracing::info!(
        inserted,
        class_id = %class_id,
        subject_id = %subject_id,
        "scheduled lessons"
    );

    Ok(inserted)
}
