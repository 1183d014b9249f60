#[tokio::main]
async fn main() -> std::process::ExitCode {
    conformance::start(std::env::args()).await
}
