use std::{
    fmt::{self, Display, Formatter},
    time::Duration,
};

/// Command line arguments for reaching the order service.
#[derive(clap::Parser)]
#[group(skip)]
pub struct Arguments {
    /// Base URL of the order service. Trailing slashes are ignored.
    #[clap(
        long,
        env = "MOS_BASE_URL",
        default_value = "http://localhost:8080",
        global = true
    )]
    pub base_url: String,

    /// Timeout for every request to the order service.
    #[clap(
        long,
        env,
        default_value = "10s",
        value_parser = humantime::parse_duration,
        global = true
    )]
    pub http_timeout: Duration,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self {
            base_url,
            http_timeout,
        } = self;

        writeln!(f, "base_url: {base_url}")?;
        writeln!(f, "http_timeout: {http_timeout:?}")
    }
}
