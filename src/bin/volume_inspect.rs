use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tokio::sync::mpsc::error::TrySendError;
use tracing::info;

use logs_volume::engine::channel::{ChannelMetrics, ChannelSnapshot, ResponseChannel};
use logs_volume::engine::frame::QueryResponse;
use logs_volume::engine::volume::{
    AggregationResult, LoadingState, LogsVolumeRequest, LogsVolumeUpdate, QueryTarget,
    query_logs_volume,
};
use logs_volume::logging;
use logs_volume::shared::config::CONFIG;
use logs_volume::shared::datetime::{TimeRange, resolve_interval, time_rounding_clause};

/// Replays recorded query responses through the logs volume pipeline and
/// prints every lifecycle update as JSON.
#[derive(Parser, Debug)]
#[command(name = "volume_inspect")]
struct Args {
    /// JSON file holding an array of query responses, in delivery order
    input: PathBuf,

    /// Range start in epoch milliseconds
    #[arg(long, default_value_t = 0)]
    from_ms: i64,

    /// Range end in epoch milliseconds
    #[arg(long)]
    to_ms: i64,

    /// Interval hint used to show the resolved bucket
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Timestamp column for the rounding clause (defaults to `volume.time_column`)
    #[arg(long)]
    time_column: Option<String>,

    /// Query text echoed back as the target
    #[arg(long, default_value = "")]
    query: String,
}

#[derive(Serialize)]
struct UpdateReport<'a> {
    state: LoadingState,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a AggregationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct ChannelReport {
    capacity: usize,
    #[serde(flatten)]
    counters: ChannelSnapshot,
}

#[derive(Serialize)]
struct BucketReport {
    label: &'static str,
    interval_ms: Option<u64>,
    rounding: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostic: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init()?;
    let args = Args::parse();

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let responses: Vec<QueryResponse> =
        serde_json::from_str(&raw).context("parsing recorded responses")?;
    info!(batches = responses.len(), "replaying recorded responses");

    let range = TimeRange::from_millis(args.from_ms, args.to_ms)?;
    let request = LogsVolumeRequest::new(vec![QueryTarget::new("A", args.query.clone())], range);

    let metrics = ChannelMetrics::new();
    let (tx, rx) = ResponseChannel::with_default_capacity(Arc::clone(&metrics));
    let capacity = tx.capacity();
    let producer = tokio::spawn(async move {
        for response in responses {
            match tx.try_send(response) {
                Ok(()) => {}
                Err(TrySendError::Full(Ok(response))) => {
                    if tx.send(response).await.is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    let mut stream = query_logs_volume(move || rx, request);
    while let Some(update) = stream.recv().await {
        print_json(&report(&update))?;
    }
    producer.await?;
    print_json(&ChannelReport {
        capacity,
        counters: metrics.snapshot(),
    })?;

    let column = args
        .time_column
        .unwrap_or_else(|| CONFIG.volume.time_column.clone());
    let interval = resolve_interval(args.interval_ms, range.span_ms());
    let clause = time_rounding_clause(args.interval_ms, range.span_ms(), &column);
    print_json(&BucketReport {
        label: interval.label(),
        interval_ms: interval.interval_ms(),
        rounding: clause.expression,
        diagnostic: clause.diagnostic.map(|d| d.to_string()),
    })?;

    Ok(())
}

fn report(update: &LogsVolumeUpdate) -> UpdateReport<'_> {
    UpdateReport {
        state: update.state(),
        result: update.result(),
        error: update.error().map(|e| e.to_string()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
