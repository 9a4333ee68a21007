pub mod args;
pub mod input_spec;
pub mod log_color;
