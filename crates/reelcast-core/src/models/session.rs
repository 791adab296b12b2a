use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to establish a browser session from a signed token
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SessionRequest {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub success: bool,
}
