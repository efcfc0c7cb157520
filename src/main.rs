use anyhow::Result;
use clap::Parser;
use sftp_cnx::{cli::Cli, config::Config, messages, run_transfer};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;

    // 未设置 RUST_LOG 时按 --verbose 选择日志级别
    let default_level = if config.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let missing = config.connection.missing_keys();
    if !missing.is_empty() {
        eprintln!(
            "\n❌ {}: {}\n",
            messages::MISSING_ATTRIBUTES,
            messages::key_list(&missing)
        );
        std::process::exit(1);
    }

    if let Some(host) = config.connection.get("host") {
        println!(
            "Target: {}@{}:{}",
            config.connection.get("user").unwrap_or_default(),
            host,
            config.connection.get("port").unwrap_or_default()
        );
    }

    match run_transfer(config) {
        Ok(_) => {
            println!("\n✅ Transfer completed successfully!\n");
        }
        Err(e) => {
            eprintln!("\n❌ Transfer failed: {:#}\n", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
