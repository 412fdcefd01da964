// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]
use RustedTaylor::Examples::taylor_examples::taylor_examples;
use RustedTaylor::Utils::log_setup::{init_logging, timestamped_log_name};
use RustedTaylor::taylor::settings::ExpansionSettings;
use log::error;

fn main() {
    // an optional settings file as the first argument, an example number as the second
    let args: Vec<String> = std::env::args().collect();
    let settings = match args.get(1) {
        Some(path) => match ExpansionSettings::from_file(path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => ExpansionSettings::default(),
    };
    let log_file = timestamped_log_name("taylor");
    if let Err(e) = init_logging(settings.loglevel.as_deref(), Some(&log_file)) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let example = match args.get(2).map(|s| s.parse::<usize>()) {
        Some(Ok(example)) => example,
        Some(Err(e)) => {
            error!("example number: {}", e);
            std::process::exit(1);
        }
        None => 4,
    };
    match example {
        0..=6 => taylor_examples(example),
        _ => {
            for example in 0..=6 {
                taylor_examples(example);
            }
        }
    }
}
