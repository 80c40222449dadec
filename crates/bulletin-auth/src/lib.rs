/// Bulletin auth primitives.
///
/// Two concerns live here: salted HMAC-SHA512 password hashing for the
/// credential store, and the in-process session directory that maps opaque
/// tokens to usernames. Neither touches the database or the HTTP layer.

pub mod password;
pub mod session;
