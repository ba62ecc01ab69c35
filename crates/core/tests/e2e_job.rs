//! End-to-end tests: scaffold a workspace, load it, run jobs from it.

mod common;

use common::*;
use jk_core::bridge::user_context;
use jk_core::config::load_config;
use jk_core::executor::ScriptedExecutorFactory;
use jk_core::init::{generate_job_kit_structure, InitOptions};
use jk_core::jobs::{JobManager, LocalJobHandlerFactory};
use jk_protocol::job_models::RunnerStatus;
use jk_protocol::request_models::{UserChoiceResult, UserInputResult};
use std::sync::Arc;
use tempfile::tempdir;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_scaffolded_simple_task_runs_to_success() {
    // scaffold a fresh workspace
    let dir = tempdir().expect("temp dir created");
    generate_job_kit_structure(InitOptions {
        target_dir: dir.path().to_path_buf(),
        force: false,
        minimal: true,
    })
    .await
    .expect("workspace scaffolded");

    // load it back
    let config = load_config(dir.path()).await.expect("config loads");
    let procedure = config
        .find_procedure("simple-task")
        .expect("template procedure present")
        .clone();

    // run it
    let factory = Arc::new(
        LocalJobHandlerFactory::new(Arc::new(ScriptedExecutorFactory::new()))
            .with_default_tick_timeout(config.global.tick_timeout_ms),
    );
    let (tx, rx) = mpsc::channel(config.global.event_capacity);
    let mut manager = JobManager::new(factory, tx);

    let job_id = manager.submit_job(procedure).await.expect("job submitted");
    manager.start(job_id).await.expect("job started");

    let events = collect_until_finished(rx, job_id).await;
    let statuses = status_sequence(&events, job_id);
    assert_eq!(statuses.last(), Some(&RunnerStatus::Succeeded));

    let job = manager.get_job(job_id).await.expect("job record");
    // 3 warm-up ticks, 1 wait, 2 wrap-up ticks
    assert_eq!(job.tick_count, 6);
}

#[tokio::test]
async fn test_scaffolded_interactive_review_asks_the_user() {
    let dir = tempdir().expect("temp dir created");
    generate_job_kit_structure(InitOptions {
        target_dir: dir.path().to_path_buf(),
        force: false,
        minimal: false,
    })
    .await
    .expect("workspace scaffolded");

    let config = load_config(dir.path()).await.expect("config loads");
    let procedure = config
        .find_procedure("interactive-review")
        .expect("template procedure present")
        .clone();

    // interaction side answering every review with option 0 ("approve")
    let (user, receivers) = user_context(8);
    let (_choice_task, _input_task) = receivers.spawn_providers(
        |_args| UserChoiceResult {
            index: 0,
            processed: true,
        },
        |args| UserInputResult {
            value: args.current_value,
            processed: true,
        },
    );

    let factory = Arc::new(LocalJobHandlerFactory::new(Arc::new(
        ScriptedExecutorFactory::new().with_user_context(user),
    )));
    let (tx, rx) = mpsc::channel(config.global.event_capacity);
    let mut manager = JobManager::new(factory, tx);

    let job_id = manager.submit_job(procedure).await.expect("job submitted");
    manager.start(job_id).await.expect("job started");

    let events = collect_until_finished(rx, job_id).await;
    assert_eq!(
        status_sequence(&events, job_id).last(),
        Some(&RunnerStatus::Succeeded)
    );
}
