use std::fs;
use std::ops::RangeInclusive;

use clap::*;
use log::{info, Level};
use rand::Rng;

use pagesim::config::{AccessPattern, ConfigBuilder, ConfigFile};
use pagesim::error::{Error, ErrorKind, ErrorOrigin, Result};
use pagesim::prelude::v1::*;

pub enum Mode {
    Single,
    Compare,
    Sweep(RangeInclusive<usize>),
}

pub struct Options {
    pub config: Config,
    pub seed: u64,
    pub mode: Mode,
    pub show_sequence: bool,
}

pub fn parse_args() -> ArgMatches {
    Command::new("pagesim")
        .version(crate_version!())
        .author(crate_authors!())
        .about("page replacement simulator (fifo, lru, opt)")
        .arg(Arg::new("verbose").short('v').action(ArgAction::Count))
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("toml file with default values, flags take precedence")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .short('p')
                .help("instructions per page (default: 10)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("frames")
                .long("frames")
                .short('f')
                .help("number of frames (default: 5)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("total-instructions")
                .long("total-instructions")
                .short('t')
                .help("size of the simulated address space (default: 2400)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("algorithm")
                .long("algorithm")
                .short('a')
                .help("fifo, lru or opt (default: fifo)"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .short('m')
                .help("access pattern 0:sequential 1:jump 2:branch 3:loop 4:locality random (default: 3)")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("locality")
                .long("locality")
                .short('l')
                .help("locality factor between 0 and 1, pattern 4 only (default: 0.8)")
                .value_parser(value_parser!(f64)),
        )
        .arg(
            Arg::new("sequence-length")
                .long("sequence-length")
                .short('s')
                .help("number of simulated accesses (default: 1000)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("seed of the workload generator, random if omitted")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("compare")
                .long("compare")
                .help("run fifo, lru and opt on the same sequence")
                .action(ArgAction::SetTrue)
                .conflicts_with("sweep"),
        )
        .arg(
            Arg::new("sweep")
                .long("sweep")
                .help("run once per frame count in the range, e.g. 1..16")
                .value_name("MIN..MAX")
                .value_parser(parse_frame_range),
        )
        .arg(
            Arg::new("show-sequence")
                .long("show-sequence")
                .help("print the generated access sequence")
                .action(ArgAction::SetTrue),
        )
        .get_matches()
}

pub fn log_level(matches: &ArgMatches) -> Level {
    match matches.get_count("verbose") {
        0 => Level::Error,
        1 => Level::Warn,
        2 => Level::Info,
        3 => Level::Debug,
        4 => Level::Trace,
        _ => Level::Trace,
    }
}

pub fn extract_args(matches: &ArgMatches) -> Result<Options> {
    let mut builder = ConfigBuilder::new();

    if let Some(path) = matches.get_one::<String>("config") {
        let content = fs::read_to_string(path)
            .map_err(|err| Error(ErrorOrigin::ConfigFile, ErrorKind::UnableToReadFile).log_error(err))?;
        builder = ConfigFile::from_toml_str(&content)?.apply(builder)?;
        info!("loaded config file {}", path);
    }

    if let Some(&page_size) = matches.get_one::<usize>("page-size") {
        builder = builder.page_size(page_size);
    }
    if let Some(&frames) = matches.get_one::<usize>("frames") {
        builder = builder.frame_count(frames);
    }
    if let Some(&total) = matches.get_one::<usize>("total-instructions") {
        builder = builder.total_instructions(total);
    }
    if let Some(algorithm) = matches.get_one::<String>("algorithm") {
        builder = builder.algorithm(algorithm.parse()?);
    }
    if let Some(&mode) = matches.get_one::<u32>("mode") {
        builder = builder.access_pattern(AccessPattern::from_index(mode)?);
    }
    if let Some(&locality) = matches.get_one::<f64>("locality") {
        builder = builder.locality_factor(locality);
    }
    if let Some(&len) = matches.get_one::<usize>("sequence-length") {
        builder = builder.sequence_length(len);
    }

    let config = builder.build()?;

    let seed = match matches.get_one::<u64>("seed") {
        Some(&seed) => seed,
        None => rand::thread_rng().gen(),
    };

    let mode = if matches.get_flag("compare") {
        Mode::Compare
    } else if let Some(range) = matches.get_one::<RangeInclusive<usize>>("sweep") {
        Mode::Sweep(range.clone())
    } else {
        Mode::Single
    };

    Ok(Options {
        config,
        seed,
        mode,
        show_sequence: matches.get_flag("show-sequence"),
    })
}

fn parse_frame_range(s: &str) -> std::result::Result<RangeInclusive<usize>, String> {
    let (min, max) = s
        .split_once("..")
        .ok_or_else(|| format!("expected MIN..MAX, got `{}`", s))?;
    let min = min
        .trim()
        .parse::<usize>()
        .map_err(|err| format!("invalid minimum: {}", err))?;
    let max = max
        .trim()
        .trim_start_matches('=')
        .parse::<usize>()
        .map_err(|err| format!("invalid maximum: {}", err))?;

    if min == 0 || min > max {
        return Err(format!("frame range must satisfy 0 < MIN <= MAX, got {}..{}", min, max));
    }
    Ok(min..=max)
}
