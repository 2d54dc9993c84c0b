//! Small rendering helpers shared by the panes and popups

pub mod popup;
pub mod scrollbar;
