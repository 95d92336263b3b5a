use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLinkDto {
    #[validate(length(min = 1, max = 2048, message = "URL is required"))]
    #[schema(example = "https://www.rust-lang.org/learn")]
    pub url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteLinkResponse {
    pub message: String,
}
