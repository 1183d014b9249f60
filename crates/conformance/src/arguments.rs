use {
    model::BillStatusFlag,
    std::{
        fmt::{self, Display, Formatter},
        path::PathBuf,
    },
    tracing::level_filters::LevelFilter,
};

/// Checks that an order service honours its API contract.
#[derive(clap::Parser)]
#[clap(name = "conformance")]
pub struct Arguments {
    #[clap(
        long,
        env,
        default_value = "warn,conformance=info",
        global = true
    )]
    pub log_filter: String,

    #[clap(long, env, default_value = "error", global = true)]
    pub log_stderr_threshold: LevelFilter,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, default_value = "false", global = true)]
    pub use_json_logs: bool,

    #[clap(flatten)]
    pub api: api_client::Arguments,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Retrieves orders and verifies their shape, their consistency with the
    /// request and their hashes.
    #[clap(alias = "getOrders")]
    GetOrders(GetOrders),
    /// Updates the billing status of one order and verifies the response.
    #[clap(alias = "updateStatus")]
    UpdateStatus(UpdateStatus),
    /// Runs every scenario of the smoke table.
    Smoke(Smoke),
}

#[derive(clap::Args, Debug)]
pub struct GetOrders {
    /// Start of the entry time window, formatted as YYYY-MM-DDTHH:MM:SS.
    #[clap(long = "from")]
    pub from_time: String,

    /// End of the entry time window, inclusive.
    #[clap(long = "to")]
    pub to_time: String,

    /// Restricts the query to one customer, e.g. `AA0001`.
    #[clap(long)]
    pub customer_id: Option<String>,

    /// Billing status flag (1, 2, 4 or 8) to filter by. May be repeated, the
    /// flags are combined into a mask. Without any orders of every status
    /// are requested.
    #[clap(long = "bill-flag")]
    pub bill_flags: Vec<BillStatusFlag>,
}

#[derive(clap::Args, Debug)]
pub struct UpdateStatus {
    /// Hash of the order to update.
    #[clap(long)]
    pub hash: String,

    /// The new billing status, one of 1, 2, 4 or 8.
    #[clap(long)]
    pub bill_status: BillStatusFlag,
}

#[derive(clap::Args, Debug)]
pub struct Smoke {
    /// JSON file with scenarios to run instead of the built-in table.
    #[clap(long)]
    pub scenarios: Option<PathBuf>,
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            use_json_logs,
            api,
            command,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        write!(f, "{api}")?;
        writeln!(f, "command: {command:?}")?;
        Ok(())
    }
}
