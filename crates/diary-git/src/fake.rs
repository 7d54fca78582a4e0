//! Scripted [`ProcessRunner`] for unit tests

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::GitError;
use crate::runner::ProcessRunner;

enum Scripted {
    Output { stdout: String, delay: Duration },
    Failure { status: i32 },
}

/// Answers git invocations from a fixed script and records every call
///
/// Unscripted invocations fail with status 128, like git does for most
/// usage errors.
#[derive(Default)]
pub(crate) struct ScriptedRunner {
    script: HashMap<(PathBuf, String), Scripted>,
    calls: Mutex<Vec<(PathBuf, String)>>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, cwd: &str, args: &[&str], stdout: &str) -> Self {
        self.respond_after(cwd, args, stdout, Duration::ZERO)
    }

    pub(crate) fn respond_after(
        mut self,
        cwd: &str,
        args: &[&str],
        stdout: &str,
        delay: Duration,
    ) -> Self {
        self.script.insert(
            (PathBuf::from(cwd), args.join(" ")),
            Scripted::Output {
                stdout: stdout.to_string(),
                delay,
            },
        );
        self
    }

    pub(crate) fn fail(mut self, cwd: &str, args: &[&str], status: i32) -> Self {
        self.script.insert(
            (PathBuf::from(cwd), args.join(" ")),
            Scripted::Failure { status },
        );
        self
    }

    /// Calls made so far, as `"<cwd>: <args>"`
    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .expect("calls lock")
            .iter()
            .map(|(cwd, args)| format!("{}: {}", cwd.display(), args))
            .collect()
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, cwd: &Path, args: &[&str]) -> Result<String, GitError> {
        let key = (cwd.to_path_buf(), args.join(" "));
        self.calls.lock().expect("calls lock").push(key.clone());

        match self.script.get(&key) {
            Some(Scripted::Output { stdout, delay }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(*delay).await;
                }
                Ok(stdout.trim().to_string())
            }
            Some(Scripted::Failure { status }) => Err(GitError::CommandFailed {
                args: key.1,
                status: *status,
                stderr: String::new(),
            }),
            None => Err(GitError::CommandFailed {
                args: key.1,
                status: 128,
                stderr: "unscripted invocation".to_string(),
            }),
        }
    }
}
