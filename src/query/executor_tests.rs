//! Tests for executor

use super::*;
use crate::settings::Indentation;
use crate::test_utils::test_helpers::jq_or_skip;
use tokio_util::sync::CancellationToken;

fn request(document: &str, query: &str) -> QueryRequest {
    QueryRequest::new(document, query, FormattingOptions::default())
}

fn request_with(
    document: &str,
    query: &str,
    indentation: Indentation,
    sort_keys: bool,
) -> QueryRequest {
    QueryRequest::new(document, query, FormattingOptions::new(indentation, sort_keys))
}

#[test]
fn test_args_two_spaces() {
    let executor = JqExecutor::new("jq");
    let args = executor.build_args(&request("{}", ".a"));
    assert_eq!(args, vec!["--monochrome-output", "--indent", "2", ".a"]);
}

#[test]
fn test_args_four_spaces_sorted() {
    let executor = JqExecutor::new("jq");
    let args = executor.build_args(&request_with("{}", ".", Indentation::FourSpaces, true));
    assert_eq!(
        args,
        vec!["--monochrome-output", "--indent", "4", "--sort-keys", "."]
    );
}

#[test]
fn test_args_one_tab() {
    let executor = JqExecutor::new("jq");
    let args = executor.build_args(&request_with("{}", ".", Indentation::OneTab, false));
    assert_eq!(args, vec!["--monochrome-output", "--tab", "."]);
}

#[test]
fn test_args_minified() {
    let executor = JqExecutor::new("jq");
    let args = executor.build_args(&request_with("{}", ".", Indentation::Minified, false));
    assert_eq!(args, vec!["--monochrome-output", "--compact-output", "."]);
}

#[test]
fn test_args_color_output_flag() {
    let executor = JqExecutor::new("jq").with_color(true);
    let args = executor.build_args(&request("{}", "."));
    assert_eq!(args[0], "--color-output");
}

#[test]
fn test_args_blank_query_defaults_to_identity() {
    let executor = JqExecutor::new("jq");
    let args = executor.build_args(&request("{}", "   "));
    assert_eq!(args.last().map(String::as_str), Some("."));
}

#[tokio::test]
async fn test_pre_cancelled_request_never_spawns() {
    // A program that cannot exist: spawning it would fail with SpawnFailed
    let executor = JqExecutor::new("/nonexistent/jqpanel-test-binary");
    let cancel_token = CancellationToken::new();
    cancel_token.cancel();

    let result = executor
        .execute_with_cancel(&request("{}", "."), &cancel_token)
        .await;

    assert_eq!(result, Err(QueryError::Cancelled));
}

#[tokio::test]
async fn test_missing_binary_is_spawn_failure() {
    let executor = JqExecutor::new("/nonexistent/jqpanel-test-binary");
    let result = executor
        .execute_with_cancel(&request("{}", "."), &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(QueryError::SpawnFailed(_))));
}

#[tokio::test]
async fn test_field_selection() {
    let Some(jq) = jq_or_skip() else { return };
    let executor = JqExecutor::new(jq);

    let output = executor
        .execute_with_cancel(&request(r#"{"a":1,"b":2}"#, ".a"), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(output.exit_code, Some(0));
    assert_eq!(output.stdout.trim_end(), "1");
    assert!(output.stderr.is_empty());
}

#[tokio::test]
async fn test_missing_field_is_null() {
    let Some(jq) = jq_or_skip() else { return };
    let executor = JqExecutor::new(jq);

    let output = executor
        .execute_with_cancel(&request(r#"{"a":1}"#, ".c"), &CancellationToken::new())
        .await
        .unwrap();

    assert!(output.success());
    assert_eq!(output.stdout.trim_end(), "null");
}

#[tokio::test]
async fn test_invalid_query_returns_stderr() {
    let Some(jq) = jq_or_skip() else { return };
    let executor = JqExecutor::new(jq);

    let output = executor
        .execute_with_cancel(&request(r#"{"a":1}"#, "{"), &CancellationToken::new())
        .await
        .unwrap();

    assert!(!output.success());
    assert!(!output.stderr.is_empty());
}

#[tokio::test]
async fn test_empty_document_still_runs_jq() {
    let Some(jq) = jq_or_skip() else { return };
    let executor = JqExecutor::new(jq);

    let output = executor
        .execute_with_cancel(&request("", "."), &CancellationToken::new())
        .await
        .unwrap();

    // jq decides what an empty input means; it must have run and exited
    assert!(output.exit_code.is_some());
}

#[tokio::test]
async fn test_minified_and_sorted_output() {
    let Some(jq) = jq_or_skip() else { return };
    let executor = JqExecutor::new(jq);

    let output = executor
        .execute_with_cancel(
            &request_with(r#"{"b": 2, "a": [1, 2]}"#, ".", Indentation::Minified, true),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(output.stdout.trim_end(), r#"{"a":[1,2],"b":2}"#);
}

#[tokio::test]
async fn test_four_space_indentation() {
    let Some(jq) = jq_or_skip() else { return };
    let executor = JqExecutor::new(jq);

    let output = executor
        .execute_with_cancel(
            &request_with(r#"{"a":1}"#, ".", Indentation::FourSpaces, false),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(output.stdout, "{\n    \"a\": 1\n}\n");
}

#[tokio::test]
async fn test_large_document_does_not_deadlock() {
    let Some(jq) = jq_or_skip() else { return };
    let executor = JqExecutor::new(jq);
    let document = format!(
        "[{}]",
        (0..200_000).map(|i| i.to_string()).collect::<Vec<_>>().join(",")
    );

    let output = executor
        .execute_with_cancel(&request(&document, "length"), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(output.stdout.trim_end(), "200000");
}

#[tokio::test]
async fn test_cancel_kills_running_jq() {
    let Some(jq) = jq_or_skip() else { return };
    let executor = JqExecutor::new(jq);
    let cancel_token = CancellationToken::new();

    let canceller = cancel_token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let started = std::time::Instant::now();
    let result = executor
        .execute_with_cancel(&request("null", "last(range(1e12))"), &cancel_token)
        .await;

    assert_eq!(result, Err(QueryError::Cancelled));
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
}

#[tokio::test]
async fn test_timeout_kills_running_jq() {
    let Some(jq) = jq_or_skip() else { return };
    let executor = JqExecutor::new(jq).with_timeout(Some(std::time::Duration::from_millis(100)));

    let result = executor
        .execute_with_cancel(&request("null", "last(range(1e12))"), &CancellationToken::new())
        .await;

    assert!(matches!(result, Err(QueryError::TimedOut(_))));
}
