/// Open platform host for the Feishu (mainland) tenant
pub const FEISHU_BASE_URL: &str = "https://open.feishu.cn";

/// Open platform host for the Lark (international) tenant
pub const LARK_BASE_URL: &str = "https://open.larksuite.com";

/// Tenant access token endpoint for self-built apps
pub const TENANT_TOKEN_PATH: &str = "/open-apis/auth/v3/tenant_access_token/internal";

/// Bitable (multi-dimensional table) API prefix
pub const BITABLE_PREFIX: &str = "/open-apis/bitable/v1";

/// Docx (cloud document) API prefix
pub const DOCX_PREFIX: &str = "/open-apis/docx/v1";

/// Envelope `code` reported by the platform on success
pub const API_SUCCESS_CODE: i64 = 0;

/// Refresh the tenant token once less than this much validity remains
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 300;

/// Default HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum records the list endpoint returns per page
pub const MAX_PAGE_SIZE: u32 = 500;

/// Block insertion index meaning "after the last child"
pub const APPEND_INDEX: i32 = -1;

/// Text colours accepted by `text_color` / `background_color`.
pub mod color {
    pub const RED: i32 = 1;
    pub const ORANGE: i32 = 2;
    pub const YELLOW: i32 = 3;
    pub const GREEN: i32 = 4;
    pub const BLUE: i32 = 5;
    pub const PURPLE: i32 = 6;
    pub const PINK: i32 = 7;
    pub const GREY: i32 = 8;
}

/// Code block languages (subset).
pub mod language {
    pub const PLAIN_TEXT: i32 = 1;
    pub const BASH: i32 = 7;
    pub const GO: i32 = 22;
    pub const JAVASCRIPT: i32 = 30;
    pub const JSON: i32 = 28;
    pub const PYTHON: i32 = 49;
    pub const RUST: i32 = 53;
    pub const YAML: i32 = 67;
}
