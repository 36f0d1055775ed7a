pub mod atv_editor;
pub mod content_editor;
pub mod fleet_list;
pub mod header;
pub mod modal;
pub mod sign_in;
pub mod style;
pub mod tabs;
pub mod toasts;
