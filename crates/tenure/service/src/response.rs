use serde::{Deserialize, Serialize};
use tenure_types::TenureResult;

/// Caller-visible outcome of a write: `{"ok": value}` or `{"err": code}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallResponse<T> {
    Ok(T),
    Err(u16),
}

impl<T> CallResponse<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, CallResponse::Ok(_))
    }

    pub fn is_err(&self) -> bool {
        matches!(self, CallResponse::Err(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            CallResponse::Ok(value) => Some(value),
            CallResponse::Err(_) => None,
        }
    }

    pub fn err_code(&self) -> Option<u16> {
        match self {
            CallResponse::Ok(_) => None,
            CallResponse::Err(code) => Some(*code),
        }
    }
}

impl<T> From<TenureResult<T>> for CallResponse<T> {
    fn from(result: TenureResult<T>) -> Self {
        match result {
            Ok(value) => CallResponse::Ok(value),
            Err(err) => CallResponse::Err(err.code()),
        }
    }
}
