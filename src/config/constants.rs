pub const PROVIDER_TYPE_NAME: &str = "matrix";
pub const ENV_CLIENT_SERVER_URL: &str = "MATRIX_CLIENT_SERVER_URL";
pub const ENV_DEFAULT_ACCESS_TOKEN: &str = "MATRIX_DEFAULT_ACCESS_TOKEN";
pub const ENV_DEFAULT_USER_ID: &str = "MATRIX_DEFAULT_USERID";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
