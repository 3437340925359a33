pub mod file_upload;
pub mod force_graph;
pub mod graph_container;
pub mod header;
pub mod spinner;
pub mod zoom_control;
