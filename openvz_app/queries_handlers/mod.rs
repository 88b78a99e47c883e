mod get_container_by_id;
mod get_job_status;
mod list_containers;

pub use get_container_by_id::GetContainerByIdHandler;
pub use get_job_status::GetJobStatusHandler;
pub use list_containers::ListContainersHandler;
