pub mod mock;
pub mod order_service;

use {std::io::Write, tempfile::TempPath};

pub use {mock::Mock, order_service::OrderService};

pub fn init() {
    let filters = ["e2e=debug", "api_client=debug", "conformance=debug"].join(",");
    observe::tracing::initialize_reentrant(&filters);
}

pub fn config_tmp_file<C: AsRef<[u8]>>(config: C) -> TempPath {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(config.as_ref()).unwrap();
    file.into_temp_path()
}
