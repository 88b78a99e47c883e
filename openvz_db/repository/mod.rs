mod container_repository;
mod job_repository;

pub use container_repository::PostgresContainerRepository;
pub use job_repository::PostgresJobRepository;
