use std::path::PathBuf;
use std::sync::Arc;

use directories::ProjectDirs;
use forty_rules::config::AppConfig;
use forty_rules::logging::{self, LogConfig};
use forty_rules::source::{RulesSource, SupabaseRulesSource};

const LOG_FILE_NAME: &str = "forty-rules.log";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();

    // The terminal belongs to the UI, so logs go to a file or nowhere.
    if let Some(path) = log_path(&config)
        && let Err(err) = logging::init(&LogConfig::to_file(path))
    {
        eprintln!("forty-rules: logging disabled: {err}");
    }

    let source = SupabaseRulesSource::new(&config.source);
    if !source.is_configured() {
        tracing::warn!(
            target: "forty_rules::source",
            missing = ?config.source.missing(),
            "Rules source not configured"
        );
    }
    let source: Arc<dyn RulesSource> = Arc::new(source);

    tracing::info!(target: "forty_rules::tui", "Starting");
    forty_rules::tui::run(&config, source)
}

fn log_path(config: &AppConfig) -> Option<PathBuf> {
    config.log_file.clone().or_else(|| {
        ProjectDirs::from("", "", "forty-rules").map(|dirs| dirs.cache_dir().join(LOG_FILE_NAME))
    })
}
