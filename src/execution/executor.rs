//! Command execution engine.

use std::io::{self, Read, Write};
use std::process::{ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tokio::io::AsyncWriteExt;

use super::command::ExecutionOptions;
use super::result::{ExecutionResult, OutputStream};
use crate::error::AurornisError;
use crate::output::OutputSanitizer;
use crate::Result;

/// Run `command` to completion and capture its outcome.
///
/// Blocks until the child exits and both output pipes reach end of file.
/// Standard input is fed and both output pipes are drained on dedicated
/// threads, so a child filling one pipe cannot stall the other. The
/// duration runs from spawn until every stream is drained and the child
/// has exited, the same rule [`execute_async`] follows. There is no
/// timeout: a child that never exits blocks the caller forever.
///
/// A non-zero exit code is a regular result. Only a failure to launch the
/// program ([`AurornisError::Spawn`]), invalid UTF-8 output
/// ([`AurornisError::Decode`]) or a pipe failure are errors.
pub fn execute<I, S>(command: I, options: &ExecutionOptions) -> Result<ExecutionResult>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let argv = collect_argv(command)?;
    let mut process = build_process(&argv, options);

    let start = Instant::now();
    let mut child = process.spawn().map_err(|source| AurornisError::Spawn {
        program: argv[0].clone(),
        source,
    })?;

    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let payload = options.stdin_payload();

    let (status, duration, stdout, stderr) = thread::scope(|scope| -> Result<_> {
        let writer = scope.spawn(move || feed_stdin(stdin, payload));
        let stdout_reader = scope.spawn(move || drain(stdout));
        let stderr_reader = scope.spawn(move || drain(stderr));

        let status = child.wait()?;
        join(writer)?;
        let stdout = join(stdout_reader)?;
        let stderr = join(stderr_reader)?;

        // Output still held open by a grandchild counts as part of the run
        let duration = start.elapsed();

        Ok((status, duration, stdout, stderr))
    })?;

    finish(argv, status, stdout, stderr, duration, options)
}

/// Async counterpart of [`execute`], built on `tokio::process`.
///
/// The stdin write runs concurrently with `wait_with_output`, which
/// drains both output pipes while waiting for the child. The duration is
/// taken once both have completed.
pub async fn execute_async<I, S>(command: I, options: &ExecutionOptions) -> Result<ExecutionResult>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let argv = collect_argv(command)?;
    let mut process = tokio::process::Command::from(build_process(&argv, options));

    let start = Instant::now();
    let mut child = process.spawn().map_err(|source| AurornisError::Spawn {
        program: argv[0].clone(),
        source,
    })?;

    let stdin = child.stdin.take();
    let payload = options.stdin_payload();
    let feed = async move {
        if let (Some(mut stdin), Some(payload)) = (stdin, payload) {
            match stdin.write_all(&payload).await {
                Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e),
                _ => {}
            }
        }
        Ok(())
    };

    let (fed, output) = tokio::join!(feed, child.wait_with_output());
    let duration = start.elapsed();
    fed?;
    let output = output?;

    finish(argv, output.status, output.stdout, output.stderr, duration, options)
}

/// Run `command` with default options.
pub fn execute_simple<I, S>(command: I) -> Result<ExecutionResult>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    execute(command, &ExecutionOptions::default())
}

fn collect_argv<I, S>(command: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let argv: Vec<String> = command.into_iter().map(Into::into).collect();
    if argv.is_empty() {
        return Err(AurornisError::EmptyCommand);
    }
    Ok(argv)
}

/// Configure the process: cleared environment plus the built one, and all
/// three standard streams piped.
fn build_process(argv: &[String], options: &ExecutionOptions) -> std::process::Command {
    let mut process = std::process::Command::new(&argv[0]);
    process
        .args(&argv[1..])
        .env_clear()
        .envs(options.environment())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    process
}

/// Write the payload (if any) then close stdin.
///
/// A child may exit without reading its input; the resulting broken pipe
/// is not an error.
fn feed_stdin<W: Write>(stdin: Option<W>, payload: Option<Vec<u8>>) -> io::Result<()> {
    if let (Some(mut stdin), Some(payload)) = (stdin, payload) {
        match stdin.write_all(&payload) {
            Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e),
            _ => {}
        }
    }
    Ok(())
}

fn drain<R: Read>(pipe: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf)?;
    }
    Ok(buf)
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, io::Result<T>>) -> io::Result<T> {
    handle
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}

/// Decode, post-process and wrap the captured output.
fn finish(
    argv: Vec<String>,
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
    duration: Duration,
    options: &ExecutionOptions,
) -> Result<ExecutionResult> {
    let exit_code = exit_code(status);

    let stdout = process_output(stdout, OutputStream::Stdout, options)?;
    let stderr = process_output(stderr, OutputStream::Stderr, options)?;

    Ok(ExecutionResult::new(argv, exit_code, stdout, stderr, duration))
}

fn process_output(
    raw: Vec<u8>,
    stream: OutputStream,
    options: &ExecutionOptions,
) -> Result<String> {
    let mut text =
        String::from_utf8(raw).map_err(|source| AurornisError::Decode { stream, source })?;

    if options.normalize_line_endings {
        text = OutputSanitizer::normalize_line_endings(&text);
    }
    if options.strip_colors {
        text = OutputSanitizer::strip_colors(&text);
    }

    Ok(text)
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|signal| -signal))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
