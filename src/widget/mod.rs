pub mod document_picker;
pub mod help_popup;
pub mod hud_message;
pub mod marker_strip;
pub mod quiz_panel;
