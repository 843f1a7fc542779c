//! Unified API envelope and pagination wrappers

use serde::{Deserialize, Serialize};

/// Request succeeded
pub const CODE_SUCCESS: i32 = 0;
/// Request failed
pub const CODE_FAILED: i32 = 101;
/// Caller is not authorized
pub const CODE_UNAUTHORIZED: i32 = 102;

/// Unified API response format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
}

impl<T> Response<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: CODE_SUCCESS,
            message: "success".to_string(),
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == CODE_SUCCESS
    }
}

impl<T: Default> Response<T> {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            code: CODE_FAILED,
            message: message.into(),
            data: T::default(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: CODE_UNAUTHORIZED,
            message: message.into(),
            data: T::default(),
        }
    }
}

/// Paginated response data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T> {
    pub data: Vec<T>,
    pub count: i64,
    pub page_num: i32,
    pub page_size: i32,
}

impl<T> PageData<T> {
    pub fn new(data: Vec<T>, count: i64, page_num: i32, page_size: i32) -> Self {
        Self {
            data,
            count,
            page_num,
            page_size,
        }
    }
}
