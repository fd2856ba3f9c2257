pub mod app_state;
pub mod board_error;
pub mod owner;
pub mod settings;
pub mod task;
pub mod task_status;
