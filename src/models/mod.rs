//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `account`: 학생·교사·학부모·관리자 계정과 역할 판별 타입
//! - `academic`: 학급(Class), 과목(Subject), 학기(Semester)
//! - `lesson`: 수업(Lesson)과 주간 일정 패턴 요청
//!
//! `pub use X::*;`로 재공개하여 `crate::models::Lesson`처럼 짧게 접근합니다.

pub mod academic;
pub mod account;
pub mod lesson;

pub use academic::*;
pub use account::*;
pub use lesson::*;
