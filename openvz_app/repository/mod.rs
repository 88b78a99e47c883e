mod container_repository;
mod job_repository;

pub use container_repository::ContainerRepository;
pub use job_repository::JobRepository;
