use clap::{Arg, ArgAction, Command as ClapCommand};
use log::error;
use std::process;

use nandcarve::commands::{config_from_args, CommandFactory, NandcarveCommandFactory};
use nandcarve::utils::logger::Logger;

fn main() {
    let matches = ClapCommand::new("nandcarve")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Recover files from raw NAND images with a page-oriented directory filesystem")
        .arg(
            Arg::new("input")
                .help("Raw NAND image file")
                .required_unless_present("config")
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Destination directory (default: unpack_<image name> next to the image)")
                .value_name("DIR")
                .required(false),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("Only print the directory table")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("TOML configuration file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("journal")
                .long("journal")
                .help("Write an operation journal to this file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("no-progress")
                .long("no-progress")
                .help("Do not draw a progress bar")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let config = match config_from_args(&matches) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    Logger::init_global_logger(config.verbose);

    let logger = match &config.journal {
        Some(path) => match Logger::new(path) {
            Ok(l) => l,
            Err(e) => {
                eprintln!("Error initializing journal {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Logger::null(),
    };

    let factory = NandcarveCommandFactory::new();

    let command_result = factory.create_command(&matches, config, &logger);
    match command_result {
        Ok(command) => {
            if let Err(e) = command.execute() {
                error!("Command execution error: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to create command: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
}
