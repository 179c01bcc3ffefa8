// Login and registration against the credential table.
// Credentials are compared as stored; "logged in" is the only access level.

pub mod handlers;
pub mod validation;
