pub mod format;
pub mod schema;
pub mod status;
pub mod validation;
pub mod wire;
