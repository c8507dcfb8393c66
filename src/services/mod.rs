//! # 비즈니스 로직 모듈
//!
//! - `schedule`: 주간 패턴을 학기 기간의 수업들로 전개하는 일정 생성기

pub mod schedule;

pub use schedule::schedule_lessons;
