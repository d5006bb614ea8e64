use anyhow::Context;

use posdash_app::{AppConfig, run};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    posdash_observability::init(config.log_format);
    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        tracing::warn!("no paths given; usage: posdash <path>...");
    }

    let stdout = std::io::stdout();
    run(&config, &paths, &mut stdout.lock())
}
