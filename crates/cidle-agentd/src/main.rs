//! Daemon serving the start/stop hooks over HTTP.
//!
//! Wires the orchestrator to the in-memory provider backend; real SDK
//! clients are consumed interfaces and live outside this workspace. A
//! background watcher plays the role of the external timer service and
//! invokes the stop hook when the armed schedule comes due.

use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::{info, warn};

use cidle_api::{HookHandler, HttpApi, OrchestratorAdapter};
use cidle_cloud::MemoryCloud;
use cidle_core::{Clock, Orchestrator, OrchestratorConfig, SignatureValidator, SystemClock};
use cidle_model::{Instance, InstanceId, InstanceState, StopSchedule};
use cidle_observe::{LoggerConfig, logger_init};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut log_cfg = LoggerConfig::default();
    if let Ok(level) = env::var("CIDLE_LOG_LEVEL") {
        log_cfg.level = level;
    }
    if let Ok(format) = env::var("CIDLE_LOG_FORMAT") {
        log_cfg.format = format.parse()?;
    }
    logger_init(&log_cfg)?;
    info!("logger initialized");

    let config = config_from_env()?;
    info!(
        cluster = %config.cluster,
        task_definition = %config.task_definition,
        verify_signatures = config.verify_signatures,
        "orchestrator configured"
    );

    let cloud = MemoryCloud::new();
    seed_backend(&cloud, &config);

    let validator = SignatureValidator::new(
        Arc::new(cloud.clone()),
        config.secret_name.clone(),
        config.verify_signatures,
    );
    let orchestrator = Orchestrator::new(
        Arc::new(cloud.clone()),
        Arc::new(cloud.clone()),
        Arc::new(cloud.clone()),
        Arc::new(SystemClock),
        config.clone(),
    );
    let handler = Arc::new(OrchestratorAdapter::new(validator, Arc::new(orchestrator)));

    spawn_schedule_watcher(cloud.clone(), Arc::clone(&handler), config.rule_name.clone());

    let addr = env::var("CIDLE_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "serving hooks");

    let router = HttpApi::new(handler).router();
    cidle_api::axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}

fn config_from_env() -> anyhow::Result<OrchestratorConfig> {
    let mut config = OrchestratorConfig::default();

    if let Ok(cluster) = env::var("CIDLE_CLUSTER") {
        config.cluster = cluster;
    }
    if let Ok(task_definition) = env::var("CIDLE_TASK_DEFINITION") {
        config.task_definition = task_definition;
    }
    if let Ok(started_by) = env::var("CIDLE_STARTED_BY") {
        config.started_by = started_by;
    }
    if let Ok(tag) = env::var("CIDLE_INSTANCE_NAME_TAG") {
        config.instance_name_tag = tag;
    }
    if let Ok(rule) = env::var("CIDLE_RULE_NAME") {
        config.rule_name = rule;
    }
    if let Ok(minutes) = env::var("CIDLE_STOP_AFTER_MINS") {
        let minutes: i64 = minutes
            .parse()
            .context("CIDLE_STOP_AFTER_MINS must be a number of minutes")?;
        config.stop_after = time::Duration::minutes(minutes);
    }
    if let Ok(verify) = env::var("CIDLE_VERIFY_SIGNATURES") {
        config.verify_signatures =
            !matches!(verify.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no");
    }
    if let Ok(secret_name) = env::var("CIDLE_SECRET_NAME") {
        config.secret_name = secret_name;
    }

    Ok(config)
}

/// Seed the simulated backend with the CI host instance and webhook secret.
fn seed_backend(cloud: &MemoryCloud, config: &OrchestratorConfig) {
    cloud.insert_instance(Instance {
        id: InstanceId::from("i-ci-host"),
        state: InstanceState::Stopped,
        tags: HashMap::from([("Name".to_string(), config.instance_name_tag.clone())]),
    });

    let secret = env::var("CIDLE_WEBHOOK_SECRET").unwrap_or_else(|_| "dev-secret".to_string());
    cloud.insert_secret(config.secret_name.clone(), secret);
}

/// Poll the armed stop rule and invoke the stop hook when it comes due.
///
/// Stands in for the external timer service when running against the
/// simulated backend.
fn spawn_schedule_watcher(
    cloud: MemoryCloud,
    handler: Arc<OrchestratorAdapter>,
    rule_name: String,
) {
    tokio::spawn(async move {
        let clock = SystemClock;
        let mut last_handled: Option<StopSchedule> = None;
        let mut ticker = tokio::time::interval(Duration::from_secs(5));

        loop {
            ticker.tick().await;

            let Some(schedule) = cloud.rule(&rule_name) else {
                continue;
            };
            if schedule.fire_at() > clock.now() || last_handled == Some(schedule) {
                continue;
            }

            info!(rule = %rule_name, fire_at = %schedule.fire_at(), "stop schedule due");
            if let Err(e) = handler.stop().await {
                warn!("scheduled stop failed: {e}");
            }
            last_handled = Some(schedule);
        }
    });
}
