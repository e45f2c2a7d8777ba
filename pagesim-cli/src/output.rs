use colored::*;

use pagesim::prelude::v1::*;

pub fn print_config(config: &Config, seed: u64) {
    println!("=== page replacement simulator ===");
    println!("{}", config);
    println!("seed: {}", seed);
    println!("==================================");
    println!();
}

pub fn print_sequence(sequence: &AccessSequence, page_size: usize) {
    println!("access sequence (instruction/page):");
    for (i, addr) in sequence.iter().enumerate() {
        print!("{:>5}/{:<4}", addr, addr / page_size);
        if (i + 1) % 10 == 0 {
            println!();
        }
    }
    println!();
    println!();
}

pub fn print_report(report: &SimulationReport) {
    println!("=== results ===");
    println!("{}", report);
}

pub fn print_comparison(reports: &[SimulationReport]) {
    let best = reports.iter().map(|r| r.fault_count()).min().unwrap_or(0);

    println!("=== comparison ===");
    println!("{:<6} {:>8} {:>8} {:>11}", "ALG", "FAULTS", "HITS", "FAULT RATE");
    for report in reports {
        let line = format!(
            "{:<6} {:>8} {:>8} {:>10.2}%",
            report.algorithm.to_string(),
            report.fault_count(),
            report.hit_count(),
            report.rates().fault_rate * 100.0
        );
        if report.fault_count() == best {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}

pub fn print_sweep(reports: &[SimulationReport]) {
    println!("=== frame sweep ===");
    println!("{:>6} {:>8} {:>11}", "FRAMES", "FAULTS", "FAULT RATE");

    let mut previous: Option<usize> = None;
    for report in reports {
        let line = format!(
            "{:>6} {:>8} {:>10.2}%",
            report.frame_count,
            report.fault_count(),
            report.rates().fault_rate * 100.0
        );
        // more frames causing more faults (belady's anomaly)
        match previous {
            Some(prev) if report.fault_count() > prev => println!("{}", line.red()),
            _ => println!("{}", line),
        }
        previous = Some(report.fault_count());
    }
}
