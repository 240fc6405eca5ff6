//! Environment variable source: SCHEDBOT__* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `SCHEDBOT__DATA_DIR=/srv/bots` sets `data_dir`; `SCHEDBOT__HTTP__TIMEOUT_SECS=30` sets `http.timeout_secs`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("SCHEDBOT")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
