use serde::{Deserialize, Serialize};
use uuid::Uuid;

// -- Auth --

/// Body for both POST /signup/ and POST /signin/.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostMessageRequest {
    pub content: String,
}

/// The action arrives as a plain string so an unknown value can be reported
/// as bad input rather than a body-deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoteRequest {
    pub action: String,
}

/// Vote direction. Counters only ever increment; there is no un-vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Upvote,
    Downvote,
}

impl std::str::FromStr for VoteAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upvote" => Ok(VoteAction::Upvote),
            "downvote" => Ok(VoteAction::Downvote),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub content: String,
    pub username: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub upvotes: i64,
    pub downvotes: i64,
}
