pub mod list;
pub mod permissions;
