use {
    clap::Parser,
    conformance::{Outcome, arguments::Arguments},
};

pub const WINDOW: [&str; 4] = ["--from", "2025-11-24T19:00:00", "--to", "2025-11-25T01:00:00"];

pub fn arguments(base_url: &str, command: &[&str]) -> Arguments {
    let args = ["conformance", "--base-url", base_url, "--http-timeout", "5s"];
    Arguments::try_parse_from(args.into_iter().chain(command.iter().copied())).unwrap()
}

pub async fn run(base_url: &str, command: &[&str]) -> Outcome {
    e2e::setup::init();
    conformance::run(&arguments(base_url, command)).await
}

/// A `get-orders` command over the smoke window.
pub fn get_orders<'a>(extra: &[&'a str]) -> Vec<&'a str> {
    std::iter::once("get-orders")
        .chain(WINDOW)
        .chain(extra.iter().copied())
        .collect()
}
