use std::env;
use std::process::ExitCode;
use log::error;

mod assembly;
mod close_enough;
mod config;
mod deduction;
mod errors;
mod fetch;
mod initialization;
mod manager_weatherapi;
mod matcher;
mod matching;
mod models;

const USAGE: &str = "usage: weatherfit <fetch | match | deduce | close-enough | count | assemble>";

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1) else {
        eprintln!("{}", USAGE);
        return ExitCode::from(2);
    };

    let (config, mgr) = match initialization::init() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match command.as_str() {
        "fetch" => fetch::run(&config, &mgr.api),
        "match" => matching::run(&config, &mgr.matcher),
        "deduce" => deduction::run(&config, &mgr.matcher),
        "close-enough" => close_enough::run(&config),
        "count" => matching::count(&config),
        "assemble" => assembly::run(&config),
        _ => {
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{} failed: {:#}", command, e);
            ExitCode::FAILURE
        }
    }
}
