use std::str::FromStr;

use bytes::Bytes;
use dawa_core::domain::medicine_analysis::{
    IMAGE_REQUIRED_MESSAGE_URDU, entities::{UploadedImage, UserProfile},
    value_objects::AnalyzeMedicineInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;

/// Multipart body of `POST /api/analyze`, as documented in OpenAPI.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeMedicineRequest {
    /// Photo of the medicine package; its part must declare an `image/*` type
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    #[schema(example = 25, default = 0)]
    pub age: Option<i64>,
    #[schema(example = "female", default = "")]
    pub gender: Option<String>,
    #[schema(example = 60.0, default = 0.0)]
    pub weight: Option<f64>,
    /// `true`, `1` or `yes` (any case) mean pregnant
    #[schema(example = "false", default = "false")]
    pub pregnant: Option<String>,
    #[schema(example = "penicillin", default = "")]
    pub allergies: Option<String>,
}

/// Raw multipart fields collected before validation.
#[derive(Debug, Default)]
pub struct AnalyzeMedicineForm {
    pub image: Option<(Bytes, Option<String>)>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub weight: Option<String>,
    pub pregnant: Option<String>,
    pub allergies: Option<String>,
}

fn parse_number<T: FromStr + Default>(field: &str, raw: Option<&str>) -> Result<T, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(T::default()),
        Some(value) => value.parse().map_err(|_| {
            ApiError::UnprocessableEntity(format!("Invalid value for {}: {}", field, value))
        }),
    }
}

impl AnalyzeMedicineForm {
    pub fn into_input(self) -> Result<AnalyzeMedicineInput, ApiError> {
        let profile = UserProfile {
            age: parse_number("age", self.age.as_deref())?,
            gender: self.gender.unwrap_or_default(),
            weight: parse_number("weight", self.weight.as_deref())?,
            pregnant: UserProfile::parse_pregnant(self.pregnant.as_deref().unwrap_or("false")),
            allergies: self.allergies.unwrap_or_default(),
        };

        let (data, content_type) = self
            .image
            .ok_or_else(|| ApiError::BadRequest(IMAGE_REQUIRED_MESSAGE_URDU.to_string()))?;

        Ok(AnalyzeMedicineInput {
            image: UploadedImage::new(data, content_type.unwrap_or_default()),
            profile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AnalyzeMedicineForm {
        AnalyzeMedicineForm {
            image: Some((Bytes::from_static(b"jpeg"), Some("image/jpeg".to_string()))),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let input = form().into_input().unwrap();

        assert_eq!(input.profile, UserProfile::default());
        assert_eq!(input.image.content_type, "image/jpeg");
    }

    #[test]
    fn test_fields_are_parsed() {
        let input = AnalyzeMedicineForm {
            age: Some("25".to_string()),
            gender: Some("female".to_string()),
            weight: Some(" 60.5 ".to_string()),
            pregnant: Some("YES".to_string()),
            allergies: Some("penicillin".to_string()),
            ..form()
        }
        .into_input()
        .unwrap();

        assert_eq!(
            input.profile,
            UserProfile {
                age: 25,
                gender: "female".to_string(),
                weight: 60.5,
                pregnant: true,
                allergies: "penicillin".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_numbers_fall_back_to_default() {
        let input = AnalyzeMedicineForm {
            age: Some(String::new()),
            weight: Some(String::new()),
            ..form()
        }
        .into_input()
        .unwrap();

        assert_eq!(input.profile.age, 0);
        assert_eq!(input.profile.weight, 0.0);
    }

    #[test]
    fn test_non_numeric_age_is_unprocessable() {
        let result = AnalyzeMedicineForm {
            age: Some("twenty".to_string()),
            ..form()
        }
        .into_input();

        assert!(matches!(result, Err(ApiError::UnprocessableEntity(_))));
    }

    #[test]
    fn test_missing_image_is_bad_request() {
        let result = AnalyzeMedicineForm::default().into_input();
        assert!(matches!(result, Err(ApiError::BadRequest(m)) if m == IMAGE_REQUIRED_MESSAGE_URDU));
    }
}
