#[cfg(not(tarpaulin_include))]
pub mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
    };
    use uuid::Uuid;

    use openvz_types::{
        container::{Container, ContainerParameters},
        errors::{AppError, ApplicationError, CommandError, DbError},
    };

    use crate::{
        commander::ContainerCommander,
        jobs::{Job, JobStatus},
        repository::{ContainerRepository, JobRepository},
        uow::{UnitOfWork, UnitOfWorkProvider},
    };

    #[derive(Default, Clone)]
    pub struct MockJobRepository {
        jobs: Arc<Mutex<HashMap<Uuid, Job>>>,
    }

    impl MockJobRepository {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn len(&self) -> usize {
            self.jobs.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn update<F: FnOnce(&mut Job)>(&self, id: Uuid, f: F) -> Result<(), ApplicationError> {
            let mut jobs = self.jobs.lock().unwrap();
            let job = jobs
                .get_mut(&id)
                .ok_or_else(|| ApplicationError::Db(DbError::JobNotFound(id)))?;
            f(job);
            Ok(())
        }
    }

    #[async_trait]
    impl JobRepository for MockJobRepository {
        async fn add(&self, job: &Job) -> Result<(), ApplicationError> {
            self.jobs.lock().unwrap().insert(job.id, job.clone());
            Ok(())
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Job, ApplicationError> {
            self.jobs
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::JobNotFound(id)))
        }

        async fn find_claim_candidate(&self) -> Result<Option<Job>, ApplicationError> {
            Ok(self
                .jobs
                .lock()
                .unwrap()
                .values()
                .filter(|j| j.status == JobStatus::Pending && j.locked_at.is_none())
                .min_by_key(|j| j.created_at)
                .cloned())
        }

        async fn lock(
            &self,
            job_id: Uuid,
            locked_at: DateTime<Utc>,
        ) -> Result<(), ApplicationError> {
            self.update(job_id, |job| job.locked_at = Some(locked_at))
        }

        async fn mark_as_done(
            &self,
            job_id: Uuid,
            entity_type: &str,
            entity_id: &str,
        ) -> Result<(), ApplicationError> {
            self.update(job_id, |job| {
                job.status = JobStatus::Done;
                job.locked_at = None;
                job.entity_type = Some(entity_type.to_string());
                job.entity_id = Some(entity_id.to_string());
            })
        }

        async fn mark_as_failed(
            &self,
            job_id: Uuid,
            error_descr: &str,
        ) -> Result<(), ApplicationError> {
            self.update(job_id, |job| {
                job.status = JobStatus::Failed;
                job.locked_at = None;
                job.error_descr = Some(error_descr.to_string());
            })
        }
    }

    #[derive(Default, Clone)]
    pub struct MockContainerRepository {
        containers: Arc<Mutex<HashMap<Uuid, Container>>>,
    }

    impl MockContainerRepository {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn len(&self) -> usize {
            self.containers.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl ContainerRepository for MockContainerRepository {
        async fn add(&self, container: &Container) -> Result<(), ApplicationError> {
            let mut containers = self.containers.lock().unwrap();
            if containers.values().any(|c| c.name == container.name) {
                return Err(AppError::DuplicateContainerName(container.name.clone()).into());
            }
            containers.insert(container.id, container.clone());
            Ok(())
        }

        async fn exists_with_name(&self, name: &str) -> Result<bool, ApplicationError> {
            Ok(self
                .containers
                .lock()
                .unwrap()
                .values()
                .any(|c| c.name == name))
        }

        async fn get_by_id(&self, id: Uuid) -> Result<Container, ApplicationError> {
            self.containers
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or_else(|| ApplicationError::Db(DbError::ContainerNotFound(id)))
        }

        async fn list(&self, limit: i64) -> Result<Vec<Container>, ApplicationError> {
            let mut containers: Vec<Container> =
                self.containers.lock().unwrap().values().cloned().collect();
            containers.sort_by_key(|c| c.created_at);
            containers.truncate(limit.max(0) as usize);
            Ok(containers)
        }

        async fn update_parameters(
            &self,
            id: Uuid,
            parameters: &ContainerParameters,
        ) -> Result<(), ApplicationError> {
            let mut containers = self.containers.lock().unwrap();
            let container = containers
                .get_mut(&id)
                .ok_or_else(|| ApplicationError::Db(DbError::ContainerNotFound(id)))?;
            container.parameters = parameters.clone();
            Ok(())
        }

        async fn remove(&self, id: Uuid) -> Result<(), ApplicationError> {
            self.containers.lock().unwrap().remove(&id);
            Ok(())
        }
    }

    /// Shares its repositories with the provider that created it, so writes
    /// are visible across units of work. Rollback does not undo writes.
    #[derive(Default)]
    pub struct MockUnitOfWork {
        jobs: Arc<MockJobRepository>,
        containers: Arc<MockContainerRepository>,

        // Counters to check if commit/rollback was called
        committed: Arc<Mutex<usize>>,
        rolled_back: Arc<Mutex<usize>>,
    }

    impl MockUnitOfWork {
        pub fn new() -> Self {
            Default::default()
        }
    }

    #[async_trait]
    impl<'a> UnitOfWork<'a> for MockUnitOfWork {
        fn jobs(&self) -> Arc<dyn JobRepository + 'a> {
            self.jobs.clone()
        }

        fn containers(&self) -> Arc<dyn ContainerRepository + 'a> {
            self.containers.clone()
        }

        async fn commit(self: Box<Self>) -> Result<(), ApplicationError> {
            *self.committed.lock().unwrap() += 1;
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<(), ApplicationError> {
            *self.rolled_back.lock().unwrap() += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct MockUnitOfWorkProvider {
        pub jobs: Arc<MockJobRepository>,
        pub containers: Arc<MockContainerRepository>,
        committed: Arc<Mutex<usize>>,
        rolled_back: Arc<Mutex<usize>>,
    }

    impl MockUnitOfWorkProvider {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn commits(&self) -> usize {
            *self.committed.lock().unwrap()
        }

        pub fn rollbacks(&self) -> usize {
            *self.rolled_back.lock().unwrap()
        }
    }

    #[async_trait]
    impl UnitOfWorkProvider for MockUnitOfWorkProvider {
        async fn begin<'p>(&'p self) -> Result<Box<dyn UnitOfWork<'p> + 'p>, ApplicationError> {
            let uow: Box<dyn UnitOfWork<'_> + '_> = Box::new(MockUnitOfWork {
                jobs: self.jobs.clone(),
                containers: self.containers.clone(),
                committed: self.committed.clone(),
                rolled_back: self.rolled_back.clone(),
            });
            Ok(uow)
        }
    }

    /// Commander that succeeds and remembers what it was asked to do.
    #[derive(Default)]
    pub struct RecordingCommander {
        created: Mutex<Vec<(String, String)>>,
        updated: Mutex<Vec<(String, ContainerParameters)>>,
        deleted: Mutex<Vec<String>>,
    }

    impl RecordingCommander {
        pub fn new() -> Self {
            Default::default()
        }

        /// `(name, os_template)` of every created container, in call order.
        pub fn created(&self) -> Vec<(String, String)> {
            self.created.lock().unwrap().clone()
        }

        pub fn updated(&self) -> Vec<(String, ContainerParameters)> {
            self.updated.lock().unwrap().clone()
        }

        pub fn deleted(&self) -> Vec<String> {
            self.deleted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ContainerCommander for RecordingCommander {
        async fn create_container(
            &self,
            name: &str,
            os_template: &str,
            _options: Option<&ContainerParameters>,
        ) -> Result<(), CommandError> {
            self.created
                .lock()
                .unwrap()
                .push((name.to_string(), os_template.to_string()));
            Ok(())
        }

        async fn set_parameters(
            &self,
            name: &str,
            parameters: &ContainerParameters,
        ) -> Result<(), CommandError> {
            self.updated
                .lock()
                .unwrap()
                .push((name.to_string(), parameters.clone()));
            Ok(())
        }

        async fn delete_container(&self, name: &str) -> Result<(), CommandError> {
            self.deleted.lock().unwrap().push(name.to_string());
            Ok(())
        }
    }

    /// Commander whose every call fails with the same message.
    pub struct FailingCommander {
        message: String,
    }

    impl FailingCommander {
        pub fn new(message: &str) -> Self {
            Self {
                message: message.to_string(),
            }
        }
    }

    #[async_trait]
    impl ContainerCommander for FailingCommander {
        async fn create_container(
            &self,
            _name: &str,
            _os_template: &str,
            _options: Option<&ContainerParameters>,
        ) -> Result<(), CommandError> {
            Err(CommandError::Rejected(self.message.clone()))
        }

        async fn set_parameters(
            &self,
            _name: &str,
            _parameters: &ContainerParameters,
        ) -> Result<(), CommandError> {
            Err(CommandError::Rejected(self.message.clone()))
        }

        async fn delete_container(&self, _name: &str) -> Result<(), CommandError> {
            Err(CommandError::Rejected(self.message.clone()))
        }
    }
}
