//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use git2::{Oid, Repository, Signature};
use llm_commit::WorkflowError;
use llm_commit::ui::Prompter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A test git repository with one initial commit, usable by the `git` CLI.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a repository whose first commit adds `README.md`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        {
            let mut config = repo.config().expect("Failed to open repo config");
            config.set_str("user.name", "Test User").expect("Failed to set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Failed to set user.email");
            config
                .set_bool("commit.gpgsign", false)
                .expect("Failed to disable signing");
        }

        let test_repo = Self { dir, repo };
        test_repo.write_file("README.md", "# test\n");
        test_repo.stage("README.md");
        test_repo.commit_index("Initial commit");
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Get the test signature for commits.
    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write `content` to `relative` inside the work tree.
    pub fn write_file(&self, relative: &str, content: &str) {
        let file_path = self.dir.path().join(relative);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write test file");
    }

    /// Add `relative` to the index.
    pub fn stage(&self, relative: &str) {
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(relative)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Commit the current index on HEAD. Returns the commit OID.
    pub fn commit_index(&self, message: &str) -> Oid {
        let sig = self.signature();
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a branch at HEAD without checking it out.
    pub fn branch(&self, name: &str) {
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD");
        self.repo.branch(name, &head, false).expect("Failed to create branch");
    }

    /// Short name of the checked-out branch.
    pub fn head_branch(&self) -> String {
        self.repo
            .head()
            .expect("Failed to read HEAD")
            .shorthand()
            .expect("HEAD is not valid UTF-8")
            .to_string()
    }

    /// Message of the HEAD commit, without git's trailing newline.
    pub fn head_message(&self) -> String {
        let commit = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to resolve HEAD");
        commit.message().unwrap_or_default().trim_end().to_string()
    }

    /// Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> usize {
        let mut walk = self.repo.revwalk().expect("Failed to start revwalk");
        walk.push_head().expect("Failed to push HEAD");
        walk.count()
    }
}

/// Answers confirmations from a fixed queue and records every question.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<bool>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            asked: Mutex::new(Vec::new()),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, prompt: &str, _default: bool) -> Result<bool, WorkflowError> {
        self.asked.lock().unwrap().push(prompt.to_string());
        let answer = self.answers.lock().unwrap().pop_front();
        Ok(answer.unwrap_or_else(|| panic!("unexpected prompt: {prompt}")))
    }
}

/// Ollama stand-in: `/api/tags` answers 200 and `/api/generate` returns `response`.
///
/// `generate_calls` sets how many generation requests the server must see.
pub async fn ollama_server(response: &str, generate_calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"models": []})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"response": response, "done": true})),
        )
        .expect(generate_calls)
        .mount(&server)
        .await;
    server
}
