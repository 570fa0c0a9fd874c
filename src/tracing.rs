use crate::Status;
use tracing::{level_filters::LevelFilter, Level};
use tracing_subscriber::{
    fmt::writer::MakeWriterExt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

pub struct Tracing;

impl Tracing {
    /// Installs a stdout subscriber logging at INFO level.
    pub fn setup(name: &str) -> Result<(), Status> {
        Self::setup_with_level(name, Level::INFO)
    }

    /// Same as `setup()` but also emits DEBUG events.
    pub fn setup_verbose(name: &str) -> Result<(), Status> {
        Self::setup_with_level(name, Level::DEBUG)
    }

    fn setup_with_level(name: &str, level: Level) -> Result<(), Status> {
        match tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::Layer::new()
                    .with_target(false)
                    .with_writer(std::io::stdout.with_max_level(level))
                    .with_filter(LevelFilter::from_level(level)),
            )
            .try_init()
        {
            Ok(()) => {
                tracing::debug!("tracing initialised for '{name}'");
                Ok(())
            }
            Err(e) => {
                eprintln!("{e}");
                Err(Status::new("Failed to setup tracing", e))
            }
        }
    }
}
