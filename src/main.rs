mod cli;
mod config;
mod core;
mod error;
mod http;
mod models;
mod platforms;

use clap::Parser;

fn main() {
    // RUST_LOG=debug로 요청과 원본 응답까지 모두 출력
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = cli::Cli::parse();
    log::debug!("[Main] Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    if let Err(e) = cli::run(cli) {
        eprintln!("오류: {:#}", e);
        std::process::exit(1);
    }
}
