//! Handler for the `subscribe` command.

use std::process::ExitCode;

use serde_json::{json, Value};
use tokio::signal;
use tracing::info;

use super::forecast::EXIT_CLIENT_ERROR;
use crate::adapter::inbound::cli::command::SubscribeArgs;
use crate::adapter::outbound::notifier::telegram::notifier::TelegramConfig;
use crate::application::watch::{FailureReason, WatchOutcome};
use crate::domain::SubscriptionId;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::notifier::build_notification_sink;
use crate::infrastructure::factory::price::build_price_source;
use crate::infrastructure::factory::service::build_dispatcher;

/// Execute the subscribe command.
///
/// Prints the acknowledgement as soon as the request is accepted, then
/// blocks until the watch finishes. Ctrl-C cancels the watch.
///
/// # Errors
///
/// Returns an error if no price source is configured or an HTTP client
/// cannot be built.
#[allow(clippy::result_large_err)]
pub async fn execute(config: &Config, args: &SubscribeArgs) -> Result<ExitCode> {
    let source = build_price_source(config)?;
    let sink = build_notification_sink(config, TelegramConfig::from_env())?;
    let dispatcher = build_dispatcher(config, source, sink);

    let response = dispatcher.handle_json(&args.payload);
    println!("{}", serde_json::to_string(&response)?);

    let Some(id) = response
        .subscription_id
        .as_deref()
        .and_then(|raw| raw.parse::<uuid::Uuid>().ok())
        .map(SubscriptionId::from)
    else {
        return Ok(ExitCode::from(EXIT_CLIENT_ERROR));
    };

    let outcome = tokio::select! {
        outcome = dispatcher.wait(id) => outcome,
        _ = signal::ctrl_c() => {
            info!(subscription_id = %id, "Interrupted, cancelling price watch");
            dispatcher.shutdown().await.into_iter().next().map(|(_, outcome)| outcome)
        }
    };

    let Some(outcome) = outcome else {
        return Ok(ExitCode::FAILURE);
    };
    println!("{}", outcome_json(id, &outcome));

    Ok(match outcome {
        WatchOutcome::Failed(_) => ExitCode::FAILURE,
        WatchOutcome::Triggered { .. } | WatchOutcome::Cancelled { .. } => ExitCode::SUCCESS,
    })
}

fn outcome_json(id: SubscriptionId, outcome: &WatchOutcome) -> Value {
    match outcome {
        WatchOutcome::Triggered { price, polls } => json!({
            "subscription_id": id.to_string(),
            "outcome": "triggered",
            "price": price,
            "polls": polls,
        }),
        WatchOutcome::Cancelled { polls } => json!({
            "subscription_id": id.to_string(),
            "outcome": "cancelled",
            "polls": polls,
        }),
        WatchOutcome::Failed(reason) => json!({
            "subscription_id": id.to_string(),
            "outcome": "failed",
            "reason": failure_text(reason),
        }),
    }
}

fn failure_text(reason: &FailureReason) -> String {
    match reason {
        FailureReason::FetchBudgetExhausted {
            attempts,
            last_error,
        } => format!("{attempts} consecutive fetch failures, last: {last_error}"),
        FailureReason::PollLimitReached { polls } => {
            format!("target not met after {polls} polls")
        }
        FailureReason::Aborted(detail) => format!("worker aborted: {detail}"),
    }
}
