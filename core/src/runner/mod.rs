//! Process Runner
//!
//! Invokes the linter as a child process with an explicit argument vector.
//! The configured command is split into words (whitespace separated, with
//! single quotes, double quotes and backslash escapes grouping a word) and
//! never handed to a shell, so file names containing shell metacharacters
//! reach the linter verbatim.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::error::LinterInvocationError;

/// Substrings in stdout that mark a completed run even on a non-zero exit.
pub const SUCCESS_MARKERS: &[&str] = &["KO!", "Error!"];

/// A fully resolved linter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinterCommand {
    program: String,
    args: Vec<String>,
    target: PathBuf,
}

impl LinterCommand {
    /// Build the invocation `<template words...> <target>`.
    pub fn new(template: &str, target: impl Into<PathBuf>) -> Result<Self, LinterInvocationError> {
        let mut words = split_words(template)?.into_iter();
        let program = words.next().ok_or(LinterInvocationError::EmptyCommand)?;

        Ok(Self {
            program,
            args: words.collect(),
            target: target.into(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Run the linter to completion and return its stdout.
    ///
    /// No retry is attempted. Dropping the returned future kills the child.
    pub async fn run(&self) -> Result<String, LinterInvocationError> {
        tracing::debug!(program = %self.program, target = %self.target.display(), "Running linter");

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&self.target)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| LinterInvocationError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr);

        tracing::debug!(
            program = %self.program,
            code = ?output.status.code(),
            bytes = stdout.len(),
            "Linter finished"
        );

        check_completion(&self.program, output.status.code(), stdout, &stderr)
    }
}

/// Decide whether a finished run produced a usable report.
///
/// Exit code 0 is always a completion. Any other outcome counts only when
/// stdout carries one of [`SUCCESS_MARKERS`].
pub fn check_completion(
    program: &str,
    code: Option<i32>,
    stdout: String,
    stderr: &str,
) -> Result<String, LinterInvocationError> {
    if code == Some(0) || SUCCESS_MARKERS.iter().any(|m| stdout.contains(m)) {
        return Ok(stdout);
    }

    let message = if stderr.trim().is_empty() {
        stdout.trim()
    } else {
        stderr.trim()
    };

    Err(LinterInvocationError::Failed {
        program: program.to_string(),
        code,
        message: message.to_string(),
    })
}

/// Split a command template into words, the way a POSIX shell would without
/// expansions. A leading `~/` on an unquoted word is expanded against `$HOME`.
fn split_words(template: &str) -> Result<Vec<String>, LinterInvocationError> {
    let mut words = Vec::new();
    let mut current: Option<String> = None;
    let mut quoted = false;
    let mut chars = template.chars();

    let mut finish = |word: Option<String>, quoted: bool| {
        if let Some(word) = word {
            words.push(if quoted { word } else { expand_home(&word) });
        }
    };

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                finish(current.take(), quoted);
                quoted = false;
            }
            '\\' => {
                let escaped = chars.next().unwrap_or('\\');
                current.get_or_insert_with(String::new).push(escaped);
            }
            '\'' | '"' => {
                quoted = true;
                let word = current.get_or_insert_with(String::new);
                loop {
                    match chars.next() {
                        Some(end) if end == c => break,
                        Some('\\') if c == '"' => {
                            word.push(chars.next().unwrap_or('\\'));
                        }
                        Some(ch) => word.push(ch),
                        None => return Err(LinterInvocationError::UnbalancedQuote(template.to_string())),
                    }
                }
            }
            c => current.get_or_insert_with(String::new).push(c),
        }
    }
    finish(current.take(), quoted);

    Ok(words)
}

fn expand_home(word: &str) -> String {
    match (word.strip_prefix("~/"), std::env::var_os("HOME")) {
        (Some(rest), Some(home)) => Path::new(&home).join(rest).to_string_lossy().into_owned(),
        _ => word.to_string(),
    }
}
