use std::borrow::Cow;

use rmcp::ErrorData;
use rmcp::model::{CallToolResult, Content, ErrorCode};

use crate::response::ToolResponse;

pub(crate) fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

pub(crate) fn map_serde_err(err: serde_json::Error) -> ErrorData {
    mcp_err(
        ErrorCode::INTERNAL_ERROR,
        format!("failed to serialize tool response: {err}"),
    )
}

/// Converts an envelope into tool content, flagging failures as tool errors.
pub(crate) fn into_call_result(response: &ToolResponse) -> Result<CallToolResult, ErrorData> {
    let content = vec![Content::json(response)?];
    if response.is_success() {
        Ok(CallToolResult::success(content))
    } else {
        Ok(CallToolResult::error(content))
    }
}
