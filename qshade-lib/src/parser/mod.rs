pub mod shade_qss;
pub mod widget_indices;
