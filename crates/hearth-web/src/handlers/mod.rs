pub mod account;
pub mod profiles;
pub mod timeline;
