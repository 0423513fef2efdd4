pub mod owned_qss;
pub mod qss_matcher;
pub mod shade_style;
