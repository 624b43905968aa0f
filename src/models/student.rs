use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub school: String,
    pub class: String,
    pub created_at: String, // ISO8601
}
