pub mod anchors;
pub mod contact_form;
pub mod filter;
pub mod mobile_menu;
pub mod notification;
pub mod scroll_reveal;
pub mod video_modal;
