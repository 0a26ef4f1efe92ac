//! Subprocess execution of code blocks.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

use super::{CodeBlock, language, strip_hidden_lines};

/// Maximum wall time for one code block.
pub const EXECUTE_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a code block produced no output.
#[derive(Debug, Error)]
pub enum CodeError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("execution timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Non-zero exit with something on stderr; the message is stderr verbatim.
    #[error("{0}")]
    Failed(String),

    #[error("process exited with {0}")]
    Exit(ExitStatus),

    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl CodeError {
    fn io(context: &'static str) -> impl FnOnce(std::io::Error) -> Self {
        move |source| Self::Io { context, source }
    }
}

/// Run a code block with the default timeout.
pub async fn execute(block: &CodeBlock) -> Result<String, CodeError> {
    execute_with_timeout(block, EXECUTE_TIMEOUT).await
}

/// Run a code block, killing the process after `timeout`.
///
/// The code is written to `main<ext>` in a fresh temp directory that also
/// serves as the working directory. On success stdout is followed by
/// stderr, with trailing newlines removed.
pub async fn execute_with_timeout(
    block: &CodeBlock,
    timeout: Duration,
) -> Result<String, CodeError> {
    let lang = language(&block.language)
        .ok_or_else(|| CodeError::UnsupportedLanguage(block.language.clone()))?;

    let dir = tempfile::Builder::new()
        .prefix("deck-exec-")
        .tempdir()
        .map_err(CodeError::io("creating temp dir"))?;
    let name = format!("main{}", lang.extension);
    let file = dir.path().join(&name);
    tokio::fs::write(&file, strip_hidden_lines(&block.code))
        .await
        .map_err(CodeError::io("writing source file"))?;

    let args = lang.args(
        &file.to_string_lossy(),
        &name,
        &dir.path().to_string_lossy(),
    );
    let Some((program, rest)) = args.split_first() else {
        return Err(CodeError::UnsupportedLanguage(block.language.clone()));
    };

    tracing::info!(language = %block.language, "running code block");
    let child = Command::new(program)
        .args(rest)
        .current_dir(dir.path())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(CodeError::io("starting interpreter"))?;

    let output = tokio::time::timeout(timeout, child.wait_with_output())
        .await
        .map_err(|_| CodeError::Timeout(timeout))?
        .map_err(CodeError::io("waiting for interpreter"))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        tracing::debug!(status = %output.status, "code block failed");
        return Err(if stderr.is_empty() {
            CodeError::Exit(output.status)
        } else {
            CodeError::Failed(stderr.into_owned())
        });
    }

    let combined = format!("{stdout}{stderr}");
    Ok(combined.trim_end_matches('\n').to_string())
}
