use async_trait::async_trait;
use std::process::Stdio;
use tracing::{debug, instrument};

use openvz_types::{container::ContainerParameters, errors::CommandError};

use super::ContainerCommander;

/// Runs container operations through the `vzctl` CLI.
#[derive(Debug, Clone)]
pub struct VzctlCommander {
    program: String,
}

impl VzctlCommander {
    pub fn new(program: String) -> Self {
        Self { program }
    }

    fn create_args(
        name: &str,
        os_template: &str,
        options: Option<&ContainerParameters>,
    ) -> Vec<String> {
        let mut args = vec![
            "create".to_string(),
            name.to_string(),
            "--ostemplate".to_string(),
            os_template.to_string(),
        ];
        if let Some(options) = options {
            args.extend(Self::flag_args(options));
        }
        args
    }

    fn set_args(name: &str, parameters: &ContainerParameters) -> Vec<String> {
        let mut args = vec!["set".to_string(), name.to_string()];
        args.extend(Self::flag_args(parameters));
        args.push("--save".to_string());
        args
    }

    /// `{"ram": "1G"}` becomes `--ram 1G`. Keys are sorted so the command line is stable.
    fn flag_args(parameters: &ContainerParameters) -> Vec<String> {
        let mut keys: Vec<&String> = parameters.keys().collect();
        keys.sort();
        keys.into_iter()
            .flat_map(|key| [format!("--{key}"), parameters[key].clone()])
            .collect()
    }

    #[instrument(skip(self), fields(program = %self.program))]
    async fn run(&self, args: Vec<String>) -> Result<(), CommandError> {
        let out = tokio::process::Command::new(&self.program)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| CommandError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !out.status.success() {
            return Err(CommandError::Failed {
                command: format!("{} {}", self.program, args.join(" ")),
                code: out.status.code(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }

        debug!(stdout = %String::from_utf8_lossy(&out.stdout).trim(), "vzctl finished");
        Ok(())
    }
}

#[async_trait]
impl ContainerCommander for VzctlCommander {
    async fn create_container(
        &self,
        name: &str,
        os_template: &str,
        options: Option<&ContainerParameters>,
    ) -> Result<(), CommandError> {
        self.run(Self::create_args(name, os_template, options)).await
    }

    async fn set_parameters(
        &self,
        name: &str,
        parameters: &ContainerParameters,
    ) -> Result<(), CommandError> {
        self.run(Self::set_args(name, parameters)).await
    }

    async fn delete_container(&self, name: &str) -> Result<(), CommandError> {
        self.run(vec!["destroy".to_string(), name.to_string()]).await
    }
}
