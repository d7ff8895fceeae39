pub mod config;
pub mod context;
pub mod dataset;
pub mod encode;
pub mod numfmt;
pub mod render;
pub mod scale;
pub mod stats;
pub mod tooltip;

pub use config::ChartConfig;
pub use context::ChartContext;
pub use dataset::{load_csv, load_rows, load_source, DataSource, Dataset, Record, NUMERIC_FIELDS};
pub use encode::{build_encoding, Encoding, Frame, Point, Transition};

#[cfg(test)]
pub(crate) mod test_support {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    pub fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("info,healthplot=debug")),
            )
            .with_test_writer() // Redirect logs to the test output
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }
}
