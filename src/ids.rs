//! # 식별자 코덱(Identifier Codec)
//!
//! 모든 엔티티의 식별자는 DB에 **16바이트 BLOB**으로 저장되고,
//! API 경계에서는 하이픈이 포함된 UUID 텍스트(`"0190f1c2-..."`)로 주고받습니다.
//!
//! 이 모듈은 두 표현 사이의 변환만 담당합니다.
//! 도메인 로직과 라우트 핸들러는 저장 형식을 직접 다루지 않고 `BinaryId`만 사용합니다.
//!
//! - 텍스트 → 바이너리: [`BinaryId::parse`] (또는 `str::parse`)
//! - 바이너리 → 텍스트: `Display` (`id.to_string()`)
//! - DB 행 → `BinaryId`: `TryFrom<Vec<u8>>` (`#[sqlx(try_from = "Vec<u8>")]`)
//! - DB 바인딩: [`BinaryId::as_bytes`]

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("invalid identifier '{0}'")]
    InvalidText(String),

    #[error("stored identifier must be 16 bytes, got {0}")]
    InvalidLength(usize),
}

/// 16바이트 바이너리 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BinaryId([u8; 16]);

impl BinaryId {
    /// 새 UUIDv7 식별자를 생성합니다 (생성 순서대로 정렬 가능).
    ///
    /// 호출할 때마다 다른 값이 나오므로 `Default`는 구현하지 않습니다.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self(Uuid::now_v7().into_bytes())
    }

    /// 정규 UUID 텍스트를 바이너리 형식으로 디코딩합니다.
    ///
    /// 하이픈 포함 형식만 허용합니다. 공백이나 중괄호가 붙은 형식은 거부합니다.
    pub fn parse(text: &str) -> Result<Self, IdError> {
        if text.len() != 36 {
            return Err(IdError::InvalidText(text.to_string()));
        }
        Uuid::parse_str(text)
            .map(|uuid| Self(uuid.into_bytes()))
            .map_err(|_| IdError::InvalidText(text.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for BinaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Uuid의 Display는 소문자 하이픈 형식(hyphenated)입니다.
        write!(f, "{}", Uuid::from_bytes(self.0))
    }
}

impl FromStr for BinaryId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<Vec<u8>> for BinaryId {
    type Error = IdError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        let len = bytes.len();
        let raw: [u8; 16] = bytes
            .try_into()
            .map_err(|_| IdError::InvalidLength(len))?;
        Ok(Self(raw))
    }
}

impl Serialize for BinaryId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BinaryId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
