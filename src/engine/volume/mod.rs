pub mod level;
pub mod pipeline;
pub mod reducer;
pub mod series;
pub mod subscription;

pub use level::CanonicalLevel;
pub use pipeline::{
    CancelHandle, LoadingState, LogsVolumeRequest, LogsVolumeStream, LogsVolumeUpdate,
    QueryIssuer, query_logs_volume,
};
pub use reducer::{aggregate_raw_logs_volume, fold_value};
pub use series::{AggregationResult, LevelSeries, Provenance, QueryTarget, SeriesDisplay};
pub use subscription::LogsVolumeSubscription;
