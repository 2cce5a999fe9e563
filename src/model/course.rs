use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Course {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Matemáticas")]
    pub name: String,
}
