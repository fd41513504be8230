//! Response utilities and macros for consistent API responses

use serde::Serialize;

/// Macro to create JSON responses consistently
///
/// # Example
/// ```ignore
/// ok_json!(SuccessResponse::ok())
/// ```
#[macro_export]
macro_rules! ok_json {
    ($data:expr) => {
        Ok(axum::Json($data))
    };
}

/// `{"success": true}`
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_json_macro() {
        let result: crate::ApiResult<axum::Json<SuccessResponse>> =
            ok_json!(SuccessResponse::ok());
        assert!(result.is_ok());
    }
}
