#![cfg(test)]
// End-to-end runtime smoke test (headless)
// - Starts showshelf::app::run in the background with SHOWSHELF_TEST_HEADLESS=1.
// - Points the source at a closed local port with tiny retry delays so the fetch fails fast.
// - Asserts the task does not panic; if still running after the wait, aborts it cleanly.

use std::time::Duration;

use showshelf::config::Settings;
use showshelf::state::ViewParameters;

#[tokio::test(flavor = "multi_thread")]
async fn runtime_smoke_headless_initializes_and_runs_without_panic() {
    unsafe {
        std::env::set_var("SHOWSHELF_TEST_HEADLESS", "1");
    }
    let settings = Settings {
        source_url: "http://127.0.0.1:9".to_string(),
        fetch_attempts: 1,
        fetch_base_delay_ms: 1,
        request_timeout_secs: 1,
        ..Settings::default()
    };

    let handle = tokio::spawn(async move {
        showshelf::app::run(settings, ViewParameters::default()).await
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    if handle.is_finished() {
        match handle.await {
            Ok(run_result) => {
                if let Err(e) = run_result {
                    panic!("app::run returned error early: {e:?}");
                }
                return;
            }
            Err(join_err) => panic!("app::run task panicked: {join_err}"),
        }
    }

    handle.abort();
    match handle.await {
        Ok(run_result) => {
            if let Err(e) = run_result {
                panic!("app::run completed with error on abort race: {e:?}");
            }
        }
        Err(join_err) => {
            assert!(
                join_err.is_cancelled(),
                "app::run task panicked instead of being cancelled: {join_err}"
            );
        }
    }
}
