use clap::Parser;
use result_sheet_processor::cli::{self, Args};
use result_sheet_processor::processor::{ResultSheetPipeline, discovery};
use result_sheet_processor::ResultSheetError;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    if args.list_results {
        match discovery::list_results(&args.output_dir) {
            Ok(results) => {
                cli::print_results(&args.output_dir, &results);
                process::exit(0);
            }
            Err(error) => exit_with(error),
        }
    }

    if let Err(error) = cli::setup_logging(&args) {
        exit_with(error);
    }

    let config = match args.to_config() {
        Ok(config) => config,
        Err(error) => exit_with(error),
    };

    // Create async runtime and run the pipeline
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let pipeline = ResultSheetPipeline::new(config)?;
        pipeline.run().await
    });

    match result {
        Ok(summary) => {
            cli::print_summary(&summary);
            process::exit(0);
        }
        Err(error) => exit_with(error),
    }
}

/// Report the failing stage and exit with an error code
fn exit_with(error: ResultSheetError) -> ! {
    let stage = error.stage();
    tracing::error!("{} stage failed: {}", stage, error);

    let error = anyhow::Error::new(error).context(format!("{} stage failed", stage));
    eprintln!("Error: {:#}", error);
    process::exit(1);
}
