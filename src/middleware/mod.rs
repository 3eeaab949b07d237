pub mod admin_auth;
pub mod extract;
pub mod login_limit;
