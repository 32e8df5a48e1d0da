use clap::Parser;
use stackwm_config::{Config, Modifiers};

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Modifiers to hold for key binds, comma-separated.
    ///
    /// Known names: shift, caps, ctrl, alt, mod2, mod3, logo, mod5. Defaults to alt.
    #[arg(long, value_name = "MODIFIERS")]
    pub prefix: Option<String>,
}

impl Cli {
    pub fn config(&self) -> Config {
        let config = Config::default();
        match &self.prefix {
            Some(prefix) => config.with_prefix(Modifiers::from_prefix(prefix)),
            None => config,
        }
    }
}
