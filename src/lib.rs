//! # 학사 관리 백엔드
//!
//! 학생·교사·학부모·학급·수업 등을 다루는 REST API 서버의 라이브러리 크레이트입니다.
//! 서버 실행 파일(main.rs)과 통합 테스트(tests/)가 모두 이 크레이트를 사용합니다.
//!
//! 핵심 기능은 `services::schedule`의 수업 일정 전개입니다.
//! 나머지 모듈은 존재 확인 → 저장 → JSON 응답으로 이어지는 얇은 CRUD 계층입니다.

pub mod config;
pub mod db;
pub mod error;
pub mod ids;
pub mod models;
pub mod routes;
pub mod services;
