//! Unit tests for the setup phase.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use setup_npm_publish::application::ports::StateStore;
use setup_npm_publish::application::services::setup::{ConfigFile, setup_npm_publish};
use setup_npm_publish::application::services::{
    Deps, NPMRC_EXCLUDED_STATE, SKIP_DEPLOY_KEY_STATE,
};
use setup_npm_publish::domain::{ActionError, CredentialBundle};
use setup_npm_publish::infra::fs::HostFs;

use crate::helpers::{HOST_KEYS, Job, err_output};
use crate::mocks::{MemoryStateStore, RecordingReporter, RecordingRunner};

fn with_key(key: &str) -> CredentialBundle {
    CredentialBundle::new("bot@example.com", "release-bot", Some(key.to_string()), None)
}

fn new_config() -> ConfigFile {
    ConfigFile {
        path: PathBuf::from(".npmrc"),
        existed_before: false,
    }
}

#[tokio::test]
async fn deploy_key_without_token_configures_ssh_push() {
    let job = Job::with_git_dir();
    let runner = RecordingRunner::new();
    let state = MemoryStateStore::default();
    let reporter = RecordingReporter::default();
    let deps = Deps { runner: &runner, fs: &HostFs, state: &state, reporter: &reporter };

    setup_npm_publish(&deps, &job.settings, &with_key("abc"), &new_config())
        .await
        .expect("setup");

    let ssh_dir = job.ssh_dir();
    let key_path = ssh_dir.join("id_rsa");
    assert_eq!(job.read(&key_path), "abc\n");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&key_path).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o400);
    }
    assert_eq!(job.read(&ssh_dir.join("known_hosts")), HOST_KEYS);
    assert!(job.exclude().ends_with("\n.npmrc\n"));
    assert!(job.read(&job.path(".npmrc")).contains("unsafe-perm = true"));

    let dir = ssh_dir.display();
    assert_eq!(
        runner.lines(),
        vec![
            "ssh-keyscan -t rsa github.com".to_string(),
            "git config user.email bot@example.com".to_string(),
            "git config user.name release-bot".to_string(),
            format!("git config core.sshCommand ssh -i {dir}/id_rsa -o UserKnownHostsFile={dir}/known_hosts"),
            "git remote set-url origin git@github.com:octo/widget.git".to_string(),
        ]
    );
    assert_eq!(state.get(SKIP_DEPLOY_KEY_STATE), None);
    assert_eq!(state.get(NPMRC_EXCLUDED_STATE).as_deref(), Some("true"));
}

#[tokio::test]
async fn without_deploy_key_git_is_untouched() {
    let job = Job::with_git_dir();
    let runner = RecordingRunner::new();
    let state = MemoryStateStore::default();
    let reporter = RecordingReporter::default();
    let deps = Deps { runner: &runner, fs: &HostFs, state: &state, reporter: &reporter };
    let credentials = CredentialBundle::new("bot@example.com", "release-bot", None, None);

    setup_npm_publish(&deps, &job.settings, &credentials, &new_config())
        .await
        .expect("setup");

    assert!(runner.lines().is_empty());
    assert!(!job.ssh_dir().join("id_rsa").exists());
    assert!(!job.ssh_dir().join("known_hosts").exists());
    assert_eq!(state.get(SKIP_DEPLOY_KEY_STATE).as_deref(), Some("true"));
    assert!(reporter.mentions("GIT_DEPLOY_KEY not provided"));
}

#[tokio::test]
async fn existing_config_is_marked_assume_unchanged() {
    let job = Job::with_git_dir();
    std::fs::write(job.path(".npmrc"), "registry=https://registry.npmjs.org/\n")
        .expect("seed .npmrc");
    let exclude_before = job.exclude();
    let runner = RecordingRunner::new();
    let state = MemoryStateStore::default();
    let reporter = RecordingReporter::default();
    let deps = Deps { runner: &runner, fs: &HostFs, state: &state, reporter: &reporter };
    let config = ConfigFile::detect(&HostFs, &job.settings, ".npmrc");
    assert!(config.existed_before);

    let credentials = CredentialBundle::new("", "", None, None);
    setup_npm_publish(&deps, &job.settings, &credentials, &config)
        .await
        .expect("setup");

    assert_eq!(
        runner.lines(),
        vec!["git update-index --assume-unchanged .npmrc".to_string()]
    );
    assert_eq!(job.exclude(), exclude_before);
    assert_eq!(state.get(NPMRC_EXCLUDED_STATE), None);
    assert_eq!(
        job.read(&job.path(".npmrc")),
        "registry=https://registry.npmjs.org/\n\nunsafe-perm = true\n"
    );
}

#[tokio::test]
async fn token_config_is_merged_in_config_directory() {
    let job = Job::with_git_dir();
    let runner = RecordingRunner::new();
    let state = MemoryStateStore::default();
    let reporter = RecordingReporter::default();
    let deps = Deps { runner: &runner, fs: &HostFs, state: &state, reporter: &reporter };
    let credentials = CredentialBundle::new(
        "",
        "",
        None,
        Some("//registry.npmjs.org/:_authToken=s3cret\nalways-auth = true\n".to_string()),
    );

    setup_npm_publish(&deps, &job.settings, &credentials, &new_config())
        .await
        .expect("setup");

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.dir.as_deref() == Some(job.checkout.path())));
    assert_eq!(
        calls[0].line,
        "npm config delete --location project //registry.npmjs.org/:_authToken"
    );
    assert_eq!(
        calls[1].line,
        "npm config set --location project //registry.npmjs.org/:_authToken s3cret"
    );
    assert_eq!(reporter.warnings().len(), 1);
    assert_eq!(
        job.read(&job.path(".npmrc")),
        "always-auth = true\n\nunsafe-perm = true\n"
    );
    assert!(reporter.steps.borrow().iter().all(|s| !s.contains("s3cret")));
}

#[tokio::test]
async fn missing_exclude_list_is_not_fatal() {
    let job = Job::new();
    let runner = RecordingRunner::new();
    let state = MemoryStateStore::default();
    let reporter = RecordingReporter::default();
    let deps = Deps { runner: &runner, fs: &HostFs, state: &state, reporter: &reporter };

    setup_npm_publish(&deps, &job.settings, &with_key("abc"), &new_config())
        .await
        .expect("setup continues without .git/info/exclude");

    assert!(reporter.mentions("does not exist; not excluding .npmrc"));
    assert!(runner.lines().iter().any(|l| l.starts_with("git remote set-url")));
}

#[tokio::test]
async fn failed_git_command_aborts_remaining_steps() {
    let job = Job::with_git_dir();
    let runner = RecordingRunner::new().respond(
        "git config user.email",
        err_output(128, b"fatal: not in a git directory"),
    );
    let state = MemoryStateStore::default();
    let reporter = RecordingReporter::default();
    let deps = Deps { runner: &runner, fs: &HostFs, state: &state, reporter: &reporter };

    let err = setup_npm_publish(&deps, &job.settings, &with_key("abc"), &new_config())
        .await
        .expect_err("should abort");

    match err.downcast_ref::<ActionError>() {
        Some(ActionError::CommandFailed { command, stderr, .. }) => {
            assert_eq!(command, "git config user.email bot@example.com");
            assert!(stderr.contains("not in a git directory"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!runner.lines().iter().any(|l| l.starts_with("git remote")));
}

#[tokio::test]
async fn exclusion_is_recorded_before_a_failing_step() {
    let job = Job::with_git_dir();
    let runner = RecordingRunner::new().respond("ssh-keyscan", err_output(1, b"timeout"));
    let state = MemoryStateStore::default();
    let reporter = RecordingReporter::default();
    let deps = Deps { runner: &runner, fs: &HostFs, state: &state, reporter: &reporter };

    assert!(
        setup_npm_publish(&deps, &job.settings, &with_key("abc"), &new_config())
            .await
            .is_err()
    );
    assert_eq!(state.get(NPMRC_EXCLUDED_STATE).as_deref(), Some("true"));
}

#[tokio::test]
async fn token_with_custom_config_name_fails_without_leaking_into_dot_npmrc() {
    let job = Job::with_git_dir();
    let runner = RecordingRunner::new().emulating_npm();
    let state = MemoryStateStore::default();
    let reporter = RecordingReporter::default();
    let deps = Deps { runner: &runner, fs: &HostFs, state: &state, reporter: &reporter };
    let credentials = CredentialBundle::new(
        "",
        "",
        None,
        Some("//registry.npmjs.org/:_authToken=s3cret".to_string()),
    );
    let config = ConfigFile {
        path: PathBuf::from("ci.npmrc"),
        existed_before: false,
    };

    let err = setup_npm_publish(&deps, &job.settings, &credentials, &config)
        .await
        .expect_err("should refuse");

    assert!(matches!(
        err.downcast_ref::<ActionError>(),
        Some(ActionError::UnsupportedConfigFile { .. })
    ));
    assert!(runner.lines().is_empty());
    assert!(!job.path(".npmrc").exists());
    assert!(!job.path("ci.npmrc").exists());
    assert_eq!(state.get(NPMRC_EXCLUDED_STATE).as_deref(), Some("true"));
}
