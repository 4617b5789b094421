//! Model listing and management types.

use serde::{Deserialize, Serialize};

/// One entry from `GET /models` or `GET /models/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelObject {
    pub id: String,
    pub created: i64,
    pub object: String,
    pub owned_by: String,
}

/// Response body for `GET /models`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelList {
    pub object: String,
    pub data: Vec<ModelObject>,
}

/// Response body for `DELETE /models/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDeleted {
    pub id: String,
    pub object: String,
    pub deleted: bool,
}
