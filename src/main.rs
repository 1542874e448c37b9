use hourbank::commands::Cli;
use hourbank::libs::messages::macros::is_debug_mode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    if is_debug_mode() {
        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "hourbank=debug".into()))
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }

    Cli::menu()
}
