use prophet::cli::{parse_args, run_cli_command, Context};
use prophet::config::ClientConfig;
use prophet::error::ProphetError;
use prophet::logging;

use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = match parse_args(std::env::args()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            eprintln!("Run `prophet --help` for usage.");
            std::process::exit(2);
        }
    };

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config = config.with_base_url(url);
    }
    logging::init(&config.log_filter);

    let runtime = tokio::runtime::Runtime::new()?;
    let ctx = Context::new(config);

    if let Err(e) = runtime.block_on(run_cli_command(cli.command, &ctx)) {
        report(&e);
        std::process::exit(1);
    }
    Ok(())
}

fn report(error: &ProphetError) {
    tracing::debug!(code = error.error_code(), error = %error, "command failed");
    eprintln!("Error: {}", error.user_message());
    if let Some(context) = error.context() {
        eprintln!("  while: {}", context);
    }
    if error.requires_reauth() {
        eprintln!("  Log in again with `prophet login <username>`.");
    } else {
        eprintln!("  {}", error.recovery_hint());
    }
}
