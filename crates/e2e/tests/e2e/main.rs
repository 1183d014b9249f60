// <crate>/tests signals to Cargo that files inside of it are integration tests.
// Integration tests are compiled into separate binaries which is slow. To avoid
// this we create one integration test here and in this test we include all the
// tests we want to run.

mod helpers;

// Each of the following modules contains tests.
mod get_orders;
mod smoke;
mod update_status;
