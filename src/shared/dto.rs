// Requests
pub mod task_filter_params;

// Responses
pub mod action_response;
pub mod error_response;
pub mod task_get_response;
