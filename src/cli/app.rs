//! Main app runner: wires adapters and runs one flagging job

use std::process::ExitCode;

use tracing::{error, info};

use crate::application::ports::ConfigStore;
use crate::application::FlagRecordingUseCase;
use crate::domain::channel::ChannelClassifier;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::silence::SilenceCoalescer;
use crate::infrastructure::{
    ComskipDetector, MythConfigResolver, MythDatabase, MythutilSkipList, SilenceAnalyzer,
    SilenceSettings, ToolRunner, XdgConfigStore,
};

use super::args::Cli;
use super::logging;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Run one flagging job for the parsed command line
pub async fn run_flag(cli: Cli) -> ExitCode {
    let presenter = Presenter::new();

    let config = match load_merged_config(&cli).await {
        Ok(config) => config,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let level = match logging::parse_level(config.log_level_or_default()) {
        Ok(level) => level,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };
    let _log_guard = logging::init(level, &config.log_file_or_default());

    let Some(target) = cli.target() else {
        presenter.error("Expected either --jobid or --chanid and --starttime");
        return ExitCode::from(EXIT_USAGE_ERROR);
    };
    info!(?target, "commflag-wrapper {} starting", env!("CARGO_PKG_VERSION"));

    let resolver = cli
        .mythtv_config
        .clone()
        .map(MythConfigResolver::with_path)
        .unwrap_or_default();
    let db_config = match resolver.resolve().await {
        Ok(db_config) => db_config,
        Err(e) => {
            error!(error = %e, "no database connection settings");
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let db = match MythDatabase::connect(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "database unavailable");
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let use_case = build_use_case(&config, db);
    match use_case.execute(target).await {
        Ok(output) => {
            presenter.summary(&output);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            error!(error = %e, "flagging failed");
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Create adapters from the tuning config
pub fn build_use_case(
    config: &AppConfig,
    db: MythDatabase,
) -> FlagRecordingUseCase<MythDatabase, MythutilSkipList, ComskipDetector, SilenceAnalyzer> {
    let timeout = config.tool_timeout_or_default();

    let comskip = ComskipDetector::new(
        ToolRunner::new(config.comskip_or_default(), timeout),
        config.comskip_ini_or_default(),
        config.comskip_output_or_default(),
    );
    let silence = SilenceAnalyzer::new(
        ToolRunner::new(config.ffprobe_or_default(), timeout),
        ToolRunner::new(config.ffmpeg_or_default(), timeout),
        SilenceSettings {
            threshold_db: config.threshold_db_or_default(),
            min_silence_secs: config.min_silence_secs_or_default(),
        },
        SilenceCoalescer::new(config.max_comm_break_secs_or_default()),
    );
    let skiplist = MythutilSkipList::new(ToolRunner::new(config.mythutil_or_default(), timeout));
    let classifier = ChannelClassifier::new(config.silence_channels_or_default());

    FlagRecordingUseCase::new(db, skiplist, comskip, silence, classifier)
}

/// Load and merge configuration: defaults < file < CLI
pub async fn load_merged_config(cli: &Cli) -> Result<AppConfig, ConfigError> {
    let file_config = match &cli.config {
        Some(path) => {
            let store = XdgConfigStore::with_path(path);
            if !store.exists() {
                return Err(ConfigError::ReadError(format!(
                    "{}: no such file",
                    path.display()
                )));
            }
            store.load().await?
        }
        None => XdgConfigStore::new().load().await?,
    };

    let config = AppConfig::defaults()
        .merge(file_config)
        .merge(cli.to_config());
    config.validate()?;
    Ok(config)
}
