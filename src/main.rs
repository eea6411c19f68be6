use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;
use sublist::{
    ui::prompt_imsi, Cli, Command, OutputFormatter, OutputMode, SubList, SubListError,
    UserFriendlyError,
};
use tracing_subscriber::EnvFilter;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    setup_logging(&cli);

    if let Command::InitConfig { ref path } = cli.command {
        return handle_generate_config(path.clone());
    }

    let sublist = match SubList::from_cli(&cli) {
        Ok(sublist) => sublist,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    let result = match cli.command {
        Command::Export => sublist
            .export_all()
            .map(|summary| sublist.output_formatter().print_export_summary(&summary)),
        Command::Compare { first, second } => handle_compare(&sublist, first, second),
        Command::InitConfig { .. } => Ok(()),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            sublist.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn handle_compare(
    sublist: &SubList,
    first: Option<String>,
    second: Option<String>,
) -> sublist::Result<()> {
    let formatter = sublist.output_formatter();

    // Surface a missing dump before asking for anything.
    let content = sublist.read_input()?;

    if first.is_none() || second.is_none() {
        formatter.print_header("IMSI Comparison Tool");
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut prompt_out = io::stderr();

    let first = match first {
        Some(imsi) => imsi,
        None => prompt_imsi(&mut input, &mut prompt_out, "Enter first IMSI to compare:")?,
    };
    let second = match second {
        Some(imsi) => imsi,
        None => prompt_imsi(&mut input, &mut prompt_out, "Enter second IMSI to compare:")?,
    };

    let summary = sublist.compare_in(&content, &first, &second)?;
    formatter.print_comparison_summary(&first, &second, &summary);
    Ok(())
}

fn handle_generate_config(path: Option<PathBuf>) -> i32 {
    let config_path = path.unwrap_or_else(|| PathBuf::from("sublist.toml"));

    match SubList::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path.display());
            println!("\nTo use this configuration:");
            println!("  sublist --config {} export", config_path.display());
            println!("\nEdit the file to customize settings for your needs.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn exit_code_for(error: &SubListError) -> i32 {
    match error {
        SubListError::InvalidImsi { .. } | SubListError::MissingInput { .. } => 2,
        SubListError::InputNotFound { .. } => 3,
        SubListError::Config { .. } => 4,
        _ => 1,
    }
}

fn print_startup_error(error: &SubListError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

fn setup_logging(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sublist={}", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
