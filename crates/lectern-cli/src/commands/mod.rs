//! Command implementations.

pub mod ask;
pub mod configure;
pub mod extract;

pub use self::ask::execute_ask;
pub use self::configure::execute_config;
pub use self::extract::execute_extract;

use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use lectern_llm::OllamaProvider;
use lectern_pipeline::{preflight, Session};
use tracing::info;

/// Check the external services, then open a session against Ollama.
pub fn start_session(
    config: &Config,
    skip_preflight: bool,
    formatter: &Formatter,
) -> Result<Session<OllamaProvider>> {
    let provider = config.pipeline.llm.build_provider()?;

    if skip_preflight {
        eprintln!("{}", formatter.warning("Skipping startup checks"));
    } else {
        let report = preflight::run(&config.pipeline, &provider)?;
        info!(
            ocr = %report.ocr_version,
            endpoint = %report.endpoint,
            model = %report.model,
            "Startup checks passed"
        );
    }

    let session = Session::from_config(provider, &config.pipeline)?;
    info!(session = %session.session_id(), "Session started");
    Ok(session)
}
