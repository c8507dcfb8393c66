//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)와 일정 전개 서비스(services/)에서 이 모듈의 함수를 호출합니다.
//!
//! 각 하위 모듈:
//! - `accounts`: 역할별 계정 생성, 통합 뷰를 통한 계정 조회
//! - `academics`: 학급·과목·학기 생성/조회
//! - `lessons`: 수업 충돌 조회, 일괄 삽입, 완료 처리, 삭제

pub mod academics;
pub mod accounts;
pub mod lessons;

pub use academics::*;
pub use accounts::*;
pub use lessons::*;

use sqlx::SqlitePool;

/// `./migrations`의 SQL 파일들을 아직 적용되지 않은 것만 순서대로 실행합니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
