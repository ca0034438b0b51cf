use anyhow::Result;
use clap::Parser;
use fqcn_converter::cli::{
    run_convert, run_validate, Commands, ConvertOptions, FqcnConverterCli, ValidateOptions,
};
use tracing::info;

fn main() -> Result<()> {
    let cli = FqcnConverterCli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("Starting fqcn-converter v{}", env!("CARGO_PKG_VERSION"));

    let ok = match cli.command {
        Commands::Convert {
            paths,
            config,
            dry_run,
            stop_on_error,
            report,
        } => run_convert(ConvertOptions {
            paths,
            config,
            dry_run,
            stop_on_error,
            report,
        })?,
        Commands::Validate {
            paths,
            config,
            strict,
        } => run_validate(ValidateOptions {
            paths,
            config,
            strict,
        })?,
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
