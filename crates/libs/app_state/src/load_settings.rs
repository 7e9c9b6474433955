use crate::AppSettings;
use color_eyre::eyre::Result;
use std::path::Path;

/// Loads settings from `config/settings.yaml`, letting `APP__`-prefixed
/// environment variables (and `.env`) override individual fields, e.g.
/// `APP__DATABASE__URL` or `APP__STORAGE__BUCKET`.
pub fn load_app_settings() -> Result<AppSettings> {
    dotenv::from_path(".env").ok();
    let config_path = Path::new("config/settings.yaml").canonicalize()?;

    let builder = config::Config::builder()
        .add_source(config::File::from(config_path))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    let settings = builder.build()?.try_deserialize::<AppSettings>()?;
    Ok(settings)
}
