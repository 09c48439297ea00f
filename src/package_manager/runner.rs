//! 外部命令执行

use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("无法启动命令 `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("命令 `{command}` 执行失败 (exit={code:?}): {stderr}")]
    ExitStatus {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("命令 `{command}` 超时 ({}s)", .limit.as_secs())]
    Timeout { command: String, limit: Duration },
}

/// 执行一条命令行，成功时返回 stdout（不做 trim）
pub trait CommandRunner: Send + Sync {
    fn run(&self, command_line: &str) -> Result<String, ExecutionError>;
}

/// 通过系统 shell 执行命令
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    shell_flag: String,
    timeout: Option<Duration>,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>, shell_flag: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            shell_flag: shell_flag.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn spawn_error(command_line: &str, source: std::io::Error) -> ExecutionError {
        ExecutionError::Spawn {
            command: command_line.to_string(),
            source,
        }
    }

    /// 带超时等待：轮询子进程，超时则 kill
    fn wait_with_deadline(
        &self,
        handle: duct::Handle,
        command_line: &str,
        limit: Duration,
    ) -> Result<std::process::Output, ExecutionError> {
        let deadline = Instant::now() + limit;
        loop {
            match handle.try_wait() {
                Ok(Some(output)) => return Ok(output.clone()),
                Ok(None) => {}
                Err(e) => return Err(Self::spawn_error(command_line, e)),
            }
            if Instant::now() >= deadline {
                if let Err(e) = handle.kill() {
                    log::warn!("终止超时命令失败 `{}`: {}", command_line, e);
                }
                return Err(ExecutionError::Timeout {
                    command: command_line.to_string(),
                    limit,
                });
            }
            std::thread::sleep(Duration::from_millis(50));
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command_line: &str) -> Result<String, ExecutionError> {
        log::debug!("执行命令: {} {} {}", self.shell, self.shell_flag, command_line);

        let expression = duct::cmd(self.shell.as_str(), [self.shell_flag.as_str(), command_line])
            .stdin_null()
            .stdout_capture()
            .stderr_capture()
            .unchecked();

        let output = match self.timeout {
            None => expression
                .run()
                .map_err(|e| Self::spawn_error(command_line, e))?,
            Some(limit) => {
                let handle = expression
                    .start()
                    .map_err(|e| Self::spawn_error(command_line, e))?;
                self.wait_with_deadline(handle, command_line, limit)?
            }
        };

        if !output.status.success() {
            return Err(ExecutionError::ExitStatus {
                command: command_line.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// 在阻塞线程池中执行命令，调用方只有一个 await 点
pub async fn run_async(
    runner: Arc<dyn CommandRunner>,
    command_line: String,
) -> Result<String, ExecutionError> {
    let line = command_line.clone();
    tokio::task::spawn_blocking(move || runner.run(&line))
        .await
        .unwrap_or_else(|e| {
            Err(ExecutionError::Spawn {
                command: command_line,
                source: std::io::Error::other(e),
            })
        })
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::sync::Mutex;

    /// 测试用：记录收到的命令，按预设结果返回
    pub struct FakeRunner {
        output: Option<String>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeRunner {
        pub fn succeeding(output: &str) -> Self {
            Self {
                output: Some(output.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                output: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("calls lock").clone()
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, command_line: &str) -> Result<String, ExecutionError> {
            self.calls
                .lock()
                .expect("calls lock")
                .push(command_line.to_string());
            match &self.output {
                Some(out) => Ok(out.clone()),
                None => Err(ExecutionError::ExitStatus {
                    command: command_line.to_string(),
                    code: Some(127),
                    stderr: "command not found".to_string(),
                }),
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh() -> ShellRunner {
        ShellRunner::new("sh", "-c")
    }

    #[test]
    fn stdout_is_returned_untrimmed() {
        let out = sh().run("echo hello").expect("echo must succeed");
        assert_eq!(out, "hello\n");
    }

    #[test]
    fn non_zero_exit_is_an_error() {
        let err = sh().run("echo boom >&2; exit 3").expect_err("must fail");
        match err {
            ExecutionError::ExitStatus { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_shell_is_a_spawn_error() {
        let runner = ShellRunner::new("/definitely/not/a/shell", "-c");
        let err = runner.run("true").expect_err("must fail");
        assert!(matches!(err, ExecutionError::Spawn { .. }));
    }

    #[test]
    fn timeout_kills_long_commands() {
        let runner = sh().with_timeout(Some(Duration::from_millis(200)));
        let started = Instant::now();
        let err = runner.run("exec sleep 5").expect_err("must time out");
        assert!(matches!(err, ExecutionError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn timeout_does_not_affect_fast_commands() {
        let runner = sh().with_timeout(Some(Duration::from_secs(5)));
        assert_eq!(runner.run("printf ok").expect("must succeed"), "ok");
    }

    #[tokio::test]
    async fn run_async_uses_blocking_pool() {
        let runner: Arc<dyn CommandRunner> = Arc::new(sh());
        let out = run_async(runner, "printf async".to_string())
            .await
            .expect("must succeed");
        assert_eq!(out, "async");
    }
}
