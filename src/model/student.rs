use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A student on a course roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Student {
    #[schema(example = 7)]
    pub id: u64,
    #[schema(example = "Ana Pérez")]
    pub name: String,
}
