pub mod api_utils;
pub mod entity_page;
pub mod http;
pub mod icons;
pub mod modal_frame;
