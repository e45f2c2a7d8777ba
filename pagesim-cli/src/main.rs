/*!
Command line front-end of the page replacement simulator.

# Usage:
Simulate LRU with 8 frames on the locality random pattern:
```bash
cargo run --release -- -a lru -f 8 -m 4 -l 0.9
```

Compare all algorithms on the same sequence:
```bash
cargo run --release -- --compare --seed 42 -vv
```

Sweep the frame count:
```bash
cargo run --release -- -a fifo --sweep 1..16
```
*/

mod cli;
mod output;

use pagesim::prelude::v1::*;

fn run_cli(options: cli::Options) -> Result<()> {
    let config = &options.config;
    output::print_config(config, options.seed);

    let sequence = generate(config, options.seed)?;
    if options.show_sequence {
        output::print_sequence(&sequence, config.page_size());
    }

    match options.mode {
        cli::Mode::Single => {
            let report = run_with_sequence(config, &sequence)?;
            output::print_report(&report);
        }
        cli::Mode::Compare => {
            let reports = compare_algorithms(config, &sequence)?;
            output::print_comparison(&reports);
        }
        cli::Mode::Sweep(range) => {
            let reports = sweep_frames(config, &sequence, range)?;
            output::print_sweep(&reports);
        }
    }

    Ok(())
}

fn main() {
    let matches = cli::parse_args();

    simplelog::TermLogger::init(
        cli::log_level(&matches).to_level_filter(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .unwrap();

    if let Err(err) = cli::extract_args(&matches).and_then(run_cli) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
