//! Scripted git backend for testing

#![allow(dead_code)]

use async_trait::async_trait;
use pr_backport::error::Result;
use pr_backport::git::{GitBackend, GitOutput};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Records every git invocation and answers from a script.
///
/// A scripted response applies to any call whose arguments start with the
/// registered prefix; the most recently registered match wins. Unscripted
/// calls succeed with empty output, so every branch exists by default.
pub struct MockGit {
    workdir: PathBuf,
    responses: Mutex<Vec<(Vec<String>, GitOutput)>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockGit {
    pub fn new() -> Self {
        Self {
            workdir: PathBuf::from("/work/widgets"),
            responses: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer calls starting with `prefix` with `output`
    pub fn respond(&self, prefix: &[&str], output: GitOutput) {
        self.responses.lock().unwrap().push((
            prefix.iter().map(ToString::to_string).collect(),
            output,
        ));
    }

    /// Make `source` look absent from the working copy
    pub fn missing_branch(&self, source: &str) {
        let reference = format!("refs/heads/{source}");
        self.respond(
            &["rev-parse", "--verify", "--quiet", &reference],
            GitOutput::failed(1, ""),
        );
    }

    /// Make the next cherry-pick stop on a conflict in `path`
    pub fn conflict_on(&self, path: &str) {
        self.respond(
            &["cherry-pick"],
            GitOutput::failed(1, format!("CONFLICT (content): Merge conflict in {path}\n")),
        );
        self.respond(&["status", "--porcelain"], GitOutput::ok(format!("UU {path}\n")));
    }

    /// Every call so far, arguments joined with spaces
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|args| args.join(" "))
            .collect()
    }

    /// Calls whose first argument is `subcommand`
    pub fn calls_to(&self, subcommand: &str) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|args| args.first().is_some_and(|a| a == subcommand))
            .map(|args| args.join(" "))
            .collect()
    }
}

#[async_trait]
impl GitBackend for MockGit {
    async fn run(&self, args: &[&str]) -> Result<GitOutput> {
        self.calls
            .lock()
            .unwrap()
            .push(args.iter().map(ToString::to_string).collect());

        let responses = self.responses.lock().unwrap();
        let scripted = responses.iter().rev().find(|(prefix, _)| {
            prefix.len() <= args.len() && prefix.iter().zip(args).all(|(p, a)| p == a)
        });
        Ok(scripted.map_or_else(|| GitOutput::ok(""), |(_, output)| output.clone()))
    }

    fn workdir(&self) -> &Path {
        &self.workdir
    }
}
