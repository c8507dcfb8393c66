//! 수업 일정 생성의 저장소 수준 테스트 (메모리 SQLite)

mod common;

use chrono::{DateTime, Utc};
use common::{create_account, date, file_pool, lesson_count, remove_db, seed, test_pool, weekly};
use school_backend::{
    db,
    error::AppError,
    ids::BinaryId,
    models::{AccountRole, CreateAccountRequest, CreateSemesterRequest, NewLesson},
    services::{schedule::insert_scheduled_lessons, schedule_lessons},
};

fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

#[tokio::test]
async fn weekly_monday_pattern_inserts_two_lessons() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    let count = schedule_lessons(&pool, &seed.request(vec![weekly(1, "08:00", "08:45", 1)]))
        .await
        .unwrap();
    assert_eq!(count, 2);

    let class_id = BinaryId::parse(&seed.class_id).unwrap();
    let lessons = db::list_lessons_for_class(&pool, &class_id).await.unwrap();
    assert_eq!(lessons.len(), 2);

    assert_eq!(lessons[0].date, date("2024-09-02"));
    assert_eq!(lessons[0].start_time, utc("2024-09-02T08:00:00Z"));
    assert_eq!(lessons[0].end_time, utc("2024-09-02T08:45:00Z"));
    assert_eq!(lessons[1].date, date("2024-09-09"));
    assert_eq!(lessons[1].start_time, utc("2024-09-09T08:00:00Z"));
    assert_eq!(lessons[1].end_time, utc("2024-09-09T08:45:00Z"));

    for lesson in &lessons {
        assert!(!lesson.is_completed);
        assert!(lesson.description.is_none());
        assert_eq!(lesson.teacher_id.to_string(), seed.teacher_id);
        assert_eq!(lesson.subject_id.to_string(), seed.subject_id);
        assert_eq!(lesson.semester_id.to_string(), seed.semester_id);
    }
}

#[tokio::test]
async fn multiple_patterns_are_inserted_together() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    // 월요일 2회 + 수요일(9/4, 9/11) 2회
    let count = schedule_lessons(
        &pool,
        &seed.request(vec![
            weekly(1, "08:00", "08:45", 1),
            weekly(3, "10:00", "10:45", 1),
        ]),
    )
    .await
    .unwrap();

    assert_eq!(count, 4);
    assert_eq!(lesson_count(&pool).await, 4);
}

#[tokio::test]
async fn adjacent_slots_on_the_same_day_do_not_conflict() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    let count = schedule_lessons(
        &pool,
        &seed.request(vec![
            weekly(1, "08:00", "08:45", 1),
            weekly(1, "08:45", "09:30", 1),
        ]),
    )
    .await
    .unwrap();

    assert_eq!(count, 4);
}

#[tokio::test]
async fn only_identical_slots_count_as_conflicts() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    // 시간이 겹치더라도 (날짜, 시작, 종료)가 완전히 같지 않으면 충돌이 아님
    let count = schedule_lessons(
        &pool,
        &seed.request(vec![
            weekly(1, "08:00", "09:00", 1),
            weekly(1, "08:30", "09:30", 1),
        ]),
    )
    .await
    .unwrap();

    assert_eq!(count, 4);
}

#[tokio::test]
async fn colliding_patterns_in_one_request_write_nothing() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    let result = schedule_lessons(
        &pool,
        &seed.request(vec![
            weekly(1, "08:00", "08:45", 1),
            weekly(1, "08:00", "08:45", 2),
        ]),
    )
    .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(lesson_count(&pool).await, 0);
}

#[tokio::test]
async fn one_colliding_pattern_rejects_the_whole_request() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    let result = schedule_lessons(
        &pool,
        &seed.request(vec![
            weekly(2, "10:00", "10:45", 1),
            weekly(4, "13:00", "13:45", 1),
            weekly(2, "10:00", "10:45", 1),
        ]),
    )
    .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(lesson_count(&pool).await, 0);
}

#[tokio::test]
async fn existing_lesson_in_the_slot_is_a_conflict() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    schedule_lessons(&pool, &seed.request(vec![weekly(1, "08:00", "08:45", 1)]))
        .await
        .unwrap();

    let result =
        schedule_lessons(&pool, &seed.request(vec![weekly(1, "08:00", "08:45", 1)])).await;

    match result {
        Err(AppError::Conflict(message)) => assert!(message.contains("2024-09-02")),
        other => panic!("expected conflict, got {:?}", other),
    }
    assert_eq!(lesson_count(&pool).await, 2);
}

#[tokio::test]
async fn partial_overlap_with_existing_lessons_writes_nothing() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    // 9/9 월요일 하나만 미리 저장
    schedule_lessons(
        &pool,
        &seed.request_between("2024-09-03", "2024-09-10", vec![weekly(1, "08:00", "08:45", 1)]),
    )
    .await
    .unwrap();
    assert_eq!(lesson_count(&pool).await, 1);

    // 9/2는 비어 있지만 9/9가 겹치므로 전체 거부
    let result =
        schedule_lessons(&pool, &seed.request(vec![weekly(1, "08:00", "08:45", 1)])).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(lesson_count(&pool).await, 1);
}

#[tokio::test]
async fn conflict_check_is_global_across_classes() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    schedule_lessons(&pool, &seed.request(vec![weekly(1, "08:00", "08:45", 1)]))
        .await
        .unwrap();

    // 다른 학급이라도 같은 시간대면 충돌로 처리됩니다.
    let other_class = db::create_class(&pool, "8A").await.unwrap();
    let mut req = seed.request(vec![weekly(1, "08:00", "08:45", 1)]);
    req.class_id = other_class.id.to_string();

    let result = schedule_lessons(&pool, &req).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn missing_references_are_reported_in_order() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;
    let missing = BinaryId::new().to_string();

    let mut req = seed.request(vec![weekly(1, "08:00", "08:45", 1)]);
    req.teacher_id = missing.clone();
    req.class_id = missing.clone();
    req.subject_id = missing.clone();
    req.semester_id = missing.clone();
    assert!(matches!(
        schedule_lessons(&pool, &req).await,
        Err(AppError::NotFound("teacher"))
    ));

    req.teacher_id = seed.teacher_id.clone();
    assert!(matches!(
        schedule_lessons(&pool, &req).await,
        Err(AppError::NotFound("class"))
    ));

    req.class_id = seed.class_id.clone();
    assert!(matches!(
        schedule_lessons(&pool, &req).await,
        Err(AppError::NotFound("subject"))
    ));

    req.subject_id = seed.subject_id.clone();
    assert!(matches!(
        schedule_lessons(&pool, &req).await,
        Err(AppError::NotFound("semester"))
    ));

    assert_eq!(lesson_count(&pool).await, 0);
}

#[tokio::test]
async fn non_teacher_account_is_not_a_teacher() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;
    let student = create_account(&pool, AccountRole::Student, "student@school.test").await;

    let mut req = seed.request(vec![weekly(1, "08:00", "08:45", 1)]);
    req.teacher_id = student.profile().id.to_string();

    assert!(matches!(
        schedule_lessons(&pool, &req).await,
        Err(AppError::NotFound("teacher"))
    ));
}

#[tokio::test]
async fn malformed_identifier_is_rejected_before_lookups() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    let mut req = seed.request(vec![weekly(1, "08:00", "08:45", 1)]);
    req.semester_id = "not-a-uuid".to_string();

    assert!(matches!(
        schedule_lessons(&pool, &req).await,
        Err(AppError::InvalidId(_))
    ));
}

#[tokio::test]
async fn invalid_ranges_are_rejected() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;
    let pattern = || vec![weekly(1, "08:00", "08:45", 1)];

    // 역전된 기간
    let inverted = seed.request_between("2024-09-15", "2024-09-01", pattern());
    assert!(matches!(
        schedule_lessons(&pool, &inverted).await,
        Err(AppError::BadRequest(_))
    ));

    // 빈 기간
    let empty = seed.request_between("2024-09-10", "2024-09-10", pattern());
    assert!(matches!(
        schedule_lessons(&pool, &empty).await,
        Err(AppError::BadRequest(_))
    ));

    // 학기 시작 이전
    let before = seed.request_between("2024-08-25", "2024-09-15", pattern());
    assert!(matches!(
        schedule_lessons(&pool, &before).await,
        Err(AppError::BadRequest(_))
    ));

    // 학기 종료 이후
    let after = seed.request_between("2025-01-20", "2025-02-10", pattern());
    assert!(matches!(
        schedule_lessons(&pool, &after).await,
        Err(AppError::BadRequest(_))
    ));

    assert_eq!(lesson_count(&pool).await, 0);
}

#[tokio::test]
async fn semester_bounds_are_inclusive() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    let count = schedule_lessons(
        &pool,
        &seed.request_between("2024-09-01", "2025-01-31", vec![weekly(5, "12:00", "12:45", 4)]),
    )
    .await
    .unwrap();

    // 9/6부터 28일 간격: 9/6, 10/4, 11/1, 11/29, 12/27, 1/24
    assert_eq!(count, 6);
}

#[tokio::test]
async fn invalid_patterns_are_rejected() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    for schedules in [
        vec![],
        vec![weekly(7, "08:00", "08:45", 1)],
        vec![weekly(1, "08:00", "08:45", 0)],
        vec![weekly(1, "8:00", "08:45", 1)],
        vec![weekly(1, "09:00", "08:45", 1)],
    ] {
        assert!(matches!(
            schedule_lessons(&pool, &seed.request(schedules)).await,
            Err(AppError::BadRequest(_))
        ));
    }

    assert_eq!(lesson_count(&pool).await, 0);
}

#[tokio::test]
async fn window_without_matching_weekday_inserts_nothing() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    // 9/2(월) ~ 9/5(목): 다음날부터 보므로 9/3, 9/4만 후보이고 금요일은 없음
    let count = schedule_lessons(
        &pool,
        &seed.request_between("2024-09-02", "2024-09-05", vec![weekly(5, "08:00", "08:45", 1)]),
    )
    .await
    .unwrap();

    assert_eq!(count, 0);
    assert_eq!(lesson_count(&pool).await, 0);
}

#[tokio::test]
async fn completed_lesson_keeps_its_description() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    schedule_lessons(&pool, &seed.request(vec![weekly(1, "08:00", "08:45", 1)]))
        .await
        .unwrap();
    let class_id = BinaryId::parse(&seed.class_id).unwrap();
    let lessons = db::list_lessons_for_class(&pool, &class_id).await.unwrap();

    let completed = db::complete_lesson(&pool, &lessons[0].id, Some("Fractions, chapter 2"))
        .await
        .unwrap()
        .expect("lesson exists");
    assert!(completed.is_completed);
    assert_eq!(completed.description.as_deref(), Some("Fractions, chapter 2"));

    let untouched = db::get_lesson(&pool, &lessons[1].id).await.unwrap().unwrap();
    assert!(!untouched.is_completed);

    let missing = db::complete_lesson(&pool, &BinaryId::new(), None).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn deleting_lessons_frees_their_slots() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    schedule_lessons(&pool, &seed.request(vec![weekly(1, "08:00", "08:45", 1)]))
        .await
        .unwrap();
    let class_id = BinaryId::parse(&seed.class_id).unwrap();
    let subject_id = BinaryId::parse(&seed.subject_id).unwrap();

    let lessons = db::list_lessons_for_class(&pool, &class_id).await.unwrap();
    assert!(db::delete_lesson(&pool, &lessons[0].id).await.unwrap());
    assert!(!db::delete_lesson(&pool, &lessons[0].id).await.unwrap());

    let removed = db::delete_lessons_for_class_subject(&pool, &class_id, &subject_id)
        .await
        .unwrap();
    assert_eq!(removed, 1);
    assert_eq!(lesson_count(&pool).await, 0);

    // 비워진 시간대에는 다시 일정을 만들 수 있음
    let count = schedule_lessons(&pool, &seed.request(vec![weekly(1, "08:00", "08:45", 1)]))
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn semester_with_inverted_bounds_is_rejected_by_the_schema() {
    let pool = test_pool().await;

    let result = db::create_semester(
        &pool,
        &CreateSemesterRequest {
            name: "Broken".to_string(),
            start_date: date("2025-01-31"),
            end_date: date("2024-09-01"),
        },
    )
    .await;

    assert!(matches!(result, Err(AppError::Database(_))));
}

#[tokio::test]
async fn unique_slot_violation_at_insert_is_a_conflict() {
    let pool = test_pool().await;
    let seed = seed(&pool).await;

    schedule_lessons(&pool, &seed.request(vec![weekly(1, "08:00", "08:45", 1)]))
        .await
        .unwrap();

    // 충돌 검사를 건너뛰고 이미 차 있는 9/2 08:00~08:45에 바로 삽입
    let rows = vec![NewLesson {
        id: BinaryId::new(),
        date: date("2024-09-02"),
        start_time: utc("2024-09-02T08:00:00Z"),
        end_time: utc("2024-09-02T08:45:00Z"),
        teacher_id: BinaryId::parse(&seed.teacher_id).unwrap(),
        class_id: BinaryId::parse(&seed.class_id).unwrap(),
        subject_id: BinaryId::parse(&seed.subject_id).unwrap(),
        semester_id: BinaryId::parse(&seed.semester_id).unwrap(),
    }];

    let mut tx = pool.begin().await.unwrap();
    let result = insert_scheduled_lessons(&mut *tx, &rows).await;
    assert!(matches!(result, Err(AppError::Conflict(_))));
    drop(tx);

    assert_eq!(lesson_count(&pool).await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_for_one_slot_admit_exactly_one() {
    let (pool, path) = file_pool(8).await;
    let seed = seed(&pool).await;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pool = pool.clone();
            let seed = seed.clone();
            tokio::spawn(async move {
                schedule_lessons(&pool, &seed.request(vec![weekly(1, "08:00", "08:45", 1)])).await
            })
        })
        .collect();

    let mut created = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(2) => created += 1,
            Err(AppError::Conflict(_)) => conflicts += 1,
            other => panic!("expected 2 lessons or a conflict, got {:?}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicts, 3);
    assert_eq!(lesson_count(&pool).await, 2);

    remove_db(pool, &path).await;
}

#[tokio::test]
async fn duplicate_email_in_one_role_table_is_a_conflict() {
    let pool = test_pool().await;
    create_account(&pool, AccountRole::Student, "pupil@school.test").await;

    let result = db::create_account(
        &pool,
        &CreateAccountRequest {
            role: AccountRole::Student,
            first_name: "Alan".to_string(),
            last_name: "Turing".to_string(),
            email: "pupil@school.test".to_string(),
        },
    )
    .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn email_lookup_spans_every_role() {
    let pool = test_pool().await;
    create_account(&pool, AccountRole::Parent, "family@school.test").await;

    let found = db::find_account_by_email(&pool, "family@school.test")
        .await
        .unwrap()
        .expect("account exists");
    assert_eq!(found.role(), AccountRole::Parent);

    assert!(db::find_account_by_email(&pool, "nobody@school.test")
        .await
        .unwrap()
        .is_none());
}
