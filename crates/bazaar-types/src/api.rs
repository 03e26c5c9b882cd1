use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub username: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
}

// -- Items --

/// A stored posting: the document id plus its field mapping.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: String,
    pub fields: Map<String, Value>,
}
