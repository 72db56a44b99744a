use clap::Parser;
use sorter_layout::utils::logger;
use sorter_layout::CliConfig;

fn main() {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let exit_code = sorter_layout::app::execute(&cli);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
