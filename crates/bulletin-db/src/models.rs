/// Database row types — these map directly to SQLite rows.
/// Distinct from bulletin-types API models to keep the DB layer independent.

pub struct UserRow {
    pub username: String,
    pub salt: Vec<u8>,
    pub pass_hash: Vec<u8>,
    pub created_at: String,
}

pub struct MessageRow {
    pub id: String,
    pub content: String,
    pub username: String,
    pub created_at: String,
    pub upvotes: i64,
    pub downvotes: i64,
}
