pub mod menu;
pub mod roles;
pub mod users;
