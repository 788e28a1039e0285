//! MBTI catalogue service

use roster_core::MbtiType;

use crate::dto::{MbtiTypeResponse, MbtiTypesResponse, MbtiValidationResponse};

use super::error::ServiceResult;
use super::vote::parse_mbti;

/// Read-only access to the 16-type catalogue
#[derive(Debug, Clone, Copy, Default)]
pub struct MbtiService;

impl MbtiService {
    pub fn new() -> Self {
        Self
    }

    pub fn list_types(&self) -> MbtiTypesResponse {
        let types: Vec<MbtiTypeResponse> = MbtiType::ALL
            .iter()
            .map(|t| MbtiTypeResponse::from(t.info()))
            .collect();
        MbtiTypesResponse {
            total: types.len(),
            types,
        }
    }

    /// Look up one type; the code is case-insensitive
    pub fn get_type(&self, code: &str) -> ServiceResult<MbtiTypeResponse> {
        Ok(MbtiTypeResponse::from(parse_mbti(code)?.info()))
    }

    pub fn validate_type(&self, code: &str) -> MbtiValidationResponse {
        MbtiValidationResponse {
            type_code: code.trim().to_uppercase(),
            is_valid: code.parse::<MbtiType>().is_ok(),
        }
    }
}
