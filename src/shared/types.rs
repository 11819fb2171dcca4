use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
    /// Underlying cause, attached to server errors only
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
            details: None,
        }
    }

    pub fn error(
        message: Option<String>,
        errors: Option<Vec<String>>,
        details: Option<String>,
    ) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
            details,
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Success envelope for list endpoints; `meta.total` mirrors the item count
    pub fn list(items: Vec<T>) -> Self {
        let total = items.len() as i64;
        Self::success(Some(items), None, Some(Meta { total }))
    }
}
