use std::path::Path;
use std::process::ExitCode;

use bench_db::config::GauntletConfig;
use bench_db::driver::run_backend;
use bench_db::store::{ColumnStoreAdapter, LocalDiskAdapter, RedisConnector};
use bench_db::{COLUMN_STORE_REPORT_FILE, LOCAL_DISK_REPORT_FILE};
use log::error;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GauntletConfig::default();
    let mut failed = false;

    let mut column_store = ColumnStoreAdapter::new(RedisConnector::new(config.store_url.clone()));
    if let Err(e) = run_backend(
        &config,
        &mut column_store,
        Path::new(COLUMN_STORE_REPORT_FILE),
    ) {
        error!("Column store gauntlet aborted: {}", e);
        failed = true;
    }

    let mut local_disk = LocalDiskAdapter::new();
    if let Err(e) = run_backend(&config, &mut local_disk, Path::new(LOCAL_DISK_REPORT_FILE)) {
        error!("Local disk gauntlet aborted: {}", e);
        failed = true;
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
