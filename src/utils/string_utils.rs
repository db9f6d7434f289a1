//! # 문자열 유틸리티
//!
//! 문자열 처리와 관련된 공통 유틸리티 함수들입니다.
//! 입력값 정리와 강의 URL 슬러그 생성을 담당합니다.

use serde::Deserialize;
use crate::errors::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 빈 문자열이나 공백만 있는 경우 ValidationError를 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 반환합니다.
///
/// # 인자
/// * `value` - 검증할 문자열
/// * `field_name` - 필드명 (에러 메시지용)
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::validate_required_string;
///
/// assert_eq!(validate_required_string("  Hello  ", "title").unwrap(), "Hello");
/// assert!(validate_required_string("   ", "title").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(
            format!("{}은(는) 필수입니다", field_name)
        ));
    }
    Ok(trimmed.to_string())
}

/// 선택적 문자열 필드 정리
///
/// None 값이거나 빈 문자열/공백만 있는 경우 None을 반환하고,
/// 유효한 문자열인 경우 앞뒤 공백을 제거한 문자열을 Some 옵션으로 반환합니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 문자열이 유효한지 확인 (빈 문자열이 아니고 공백만으로 구성되지 않음)
pub fn is_valid_string(value: &str) -> bool {
    !value.trim().is_empty()
}

/// 강의 제목에서 URL 슬러그를 생성합니다
///
/// 영숫자를 소문자로 변환하고 나머지 문자는 하이픈으로 치환합니다.
/// 연속된 하이픈은 하나로 합쳐지며, 앞뒤 하이픈은 제거됩니다.
/// ASCII가 아닌 문자(한글 제목 등)는 그대로 유지되어 percent-encoding은
/// 라우팅 계층에 위임합니다.
///
/// # 인자
/// * `title` - 슬러그를 생성할 원본 제목
///
/// # 예제
/// ```rust,ignore
/// use crate::utils::string_utils::slugify;
///
/// assert_eq!(slugify("The Complete Rust Course"), "the-complete-rust-course");
/// assert_eq!(slugify("  C++ & Rust: 2024!  "), "c-rust-2024");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // 선행 하이픈 방지

    for c in title.trim().chars() {
        if c.is_alphanumeric() {
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    // 후행 하이픈 제거
    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// 선택적 문자열 필드를 위한 serde deserializer
///
/// JSON 역직렬화 시 빈 문자열이나 공백만 있는 문자열을 자동으로 None으로
/// 변환하고, 유효한 문자열인 경우 앞뒤 공백을 제거한 후 Some으로 반환합니다.
/// `#[serde(deserialize_with = "deserialize_optional_string")]` 속성과 함께
/// 사용됩니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        // 성공 케이스
        assert_eq!(validate_required_string("Hello", "title").unwrap(), "Hello");
        assert_eq!(validate_required_string("  World  ", "title").unwrap(), "World");

        // 실패 케이스
        assert!(validate_required_string("", "title").is_err());
        assert!(validate_required_string("   ", "title").is_err());
        assert!(validate_required_string("\t\n", "title").is_err());
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("Hello".to_string())), Some("Hello".to_string()));
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("".to_string())), None);
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_is_valid_string() {
        assert!(is_valid_string("Hello"));
        assert!(is_valid_string("  World  "));
        assert!(!is_valid_string(""));
        assert!(!is_valid_string("   "));
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("The Complete Rust Course"), "the-complete-rust-course");
        assert_eq!(slugify("Rust"), "rust");
        assert_eq!(slugify("Web Development 101"), "web-development-101");
    }

    #[test]
    fn test_slugify_special_characters() {
        assert_eq!(slugify("C++ & Rust: 2024!"), "c-rust-2024");
        assert_eq!(slugify("  spaces  everywhere  "), "spaces-everywhere");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_korean() {
        // 한글 제목은 유지됨
        assert_eq!(slugify("러스트 입문"), "러스트-입문");
        assert_eq!(slugify("Rust 마스터 과정"), "rust-마스터-과정");
    }

    #[test]
    fn test_deserialize_optional_string() {
        use serde::Deserialize;

        #[derive(Deserialize)]
        struct TestStruct {
            #[serde(deserialize_with = "deserialize_optional_string")]
            optional_field: Option<String>,
        }

        // 유효한 문자열 - 공백이 제거되고 Some 반환
        let json = r#"{"optional_field": "  Hello World  "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.optional_field, Some("Hello World".to_string()));

        // 빈 문자열 - None 반환
        let json = r#"{"optional_field": ""}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.optional_field, None);

        // null 값 - None 반환
        let json = r#"{"optional_field": null}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.optional_field, None);
    }
}
