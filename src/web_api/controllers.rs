pub mod board_controller;
pub mod health_controller;
