use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;

use whence_core::config::Config;

/// Layers the built-in defaults under `whence.toml` and `WHENCE_*`
/// environment variables, in that order of precedence.
pub fn load() -> Result<Config, figment::Error> {
    Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file("whence.toml"))
        .merge(Env::prefixed("WHENCE_"))
        .extract()
}
