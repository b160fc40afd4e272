pub mod avatar;
pub mod chat_area;
pub mod input_bar;
pub mod navbar;
pub mod sidebar;
