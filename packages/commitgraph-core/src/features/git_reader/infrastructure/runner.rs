/// Git subprocess execution
use super::error::{GitReaderError, Result};
use super::process::GitCommand;
use crate::config::ReaderConfig;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStderr, Command, Stdio};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Runs a git command and feeds its stdout to a callback, one line at a time
///
/// The callback runs synchronously on the reading thread. An error returned
/// from the callback stops the read and is propagated unchanged.
pub trait ProcessRunner {
    fn run_lines(
        &self,
        command: &GitCommand,
        on_line: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<()>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run_lines(
        &self,
        command: &GitCommand,
        on_line: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<()> {
        (**self).run_lines(command, on_line)
    }
}

/// Spawns the real git executable inside a repository
#[derive(Debug, Clone)]
pub struct GitProcessRunner {
    repo_path: PathBuf,
    git_executable: String,
}

impl GitProcessRunner {
    /// Create a runner for `repo_path`, which must contain `.git`
    pub fn open(repo_path: impl AsRef<Path>, config: &ReaderConfig) -> Result<Self> {
        let path = repo_path.as_ref().to_path_buf();

        if !path.join(".git").exists() {
            return Err(GitReaderError::NotARepository(path.display().to_string()));
        }

        Ok(Self {
            repo_path: path,
            git_executable: config.git_executable.clone(),
        })
    }

    /// Get repository path
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    fn abort(
        mut child: Child,
        stderr: Option<JoinHandle<String>>,
        err: GitReaderError,
    ) -> GitReaderError {
        let _ = child.kill();
        let _ = child.wait();
        if let Some(handle) = stderr {
            let _ = handle.join();
        }
        err
    }
}

/// Collect stderr on its own thread so a chatty git never blocks on a full pipe
fn drain_stderr(stderr: ChildStderr) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut text = String::new();
        if let Err(e) = BufReader::new(stderr).read_to_string(&mut text) {
            warn!("reading git stderr: {}", e);
        }
        text
    })
}

impl ProcessRunner for GitProcessRunner {
    fn run_lines(
        &self,
        command: &GitCommand,
        on_line: &mut dyn FnMut(&str) -> Result<()>,
    ) -> Result<()> {
        debug!("spawning {}", command.display_line());

        let mut child = Command::new(&self.git_executable)
            .args(&command.args)
            .current_dir(&self.repo_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stderr = child.stderr.take().map(drain_stderr);
        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                return Err(Self::abort(
                    child,
                    stderr,
                    GitReaderError::Protocol("git stdout was not captured".to_string()),
                ))
            }
        };

        for line in BufReader::new(stdout).lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Err(Self::abort(child, stderr, e.into())),
            };
            if let Err(e) = on_line(&line) {
                return Err(Self::abort(child, stderr, e));
            }
        }

        let status = child.wait()?;
        let stderr_text = match stderr {
            Some(handle) => handle.join().unwrap_or_default(),
            None => String::new(),
        };
        if status.success() {
            Ok(())
        } else {
            Err(GitReaderError::CommandFailed(stderr_text.trim().to_string()))
        }
    }
}
