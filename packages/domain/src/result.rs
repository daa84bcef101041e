//! # レンダリング対象の結果
//!
//! フォーマッタに渡される結果の閉じた集合。実行時の型情報に頼らず、
//! [`ResultType`] タグで形状を判別できるようにする。

use crate::{ResultType, StatusResult};

/// フォーマッタに渡す結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResult {
    Status(StatusResult),
}

impl ApiResult {
    /// 結果の形状を示すタグを返す
    pub fn result_type(&self) -> ResultType {
        match self {
            ApiResult::Status(_) => ResultType::Status,
        }
    }
}

impl From<StatusResult> for ApiResult {
    fn from(result: StatusResult) -> Self {
        ApiResult::Status(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status結果のタグがstatusになる() {
        let result = ApiResult::from(StatusResult::ok());
        assert_eq!(result.result_type(), ResultType::Status);
    }
}
