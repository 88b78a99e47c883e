mod api_response;
mod containers;
mod jobs;

pub use api_response::{ApiError, ApiResponse, Empty};
pub use containers::{
    CreateContainerRequest, UpdateContainerRequest, create_container, delete_container,
    get_container, list_containers, update_container,
};
pub use jobs::get_job;
