//! sign_lock: interactive entry point.

use std::io::{self, Write};
use std::path::PathBuf;

use sign_capture::TrainingParams;
use sign_lock::app::{run, AppConfig};
use sign_lock::logging;

fn main() {
    if let Err(e) = logging::init() {
        eprintln!("Warning: {}", e);
    }

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║            Sign Lock — gesture capture controller            ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("  Learner: simulated camera (synthetic frames, no training)");
    println!();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = match config_arg(&args) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let params = match config_path {
        Some(path) => match TrainingParams::load(&path) {
            Ok(p) => {
                println!("  Loaded training parameters from {}\n", path.display());
                p
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None if args.iter().any(|a| a == "--quick") => {
            println!("  Quick-start: default training parameters\n");
            TrainingParams::default()
        }
        None => configure_interactively(),
    };

    let cfg = AppConfig { params, ..AppConfig::default() };

    println!();
    println!("  Opening controller window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Path given with `--config`, if the flag is present.
fn config_arg(args: &[String]) -> Result<Option<PathBuf>, String> {
    let Some(i) = args.iter().position(|a| a == "--config") else {
        return Ok(None);
    };
    match args.get(i + 1) {
        Some(path) if !path.starts_with("--") => Ok(Some(PathBuf::from(path))),
        _ => Err("--config needs a file path".to_string()),
    }
}

fn configure_interactively() -> TrainingParams {
    let d = TrainingParams::default();
    println!("  Training parameters (Enter keeps the default):");

    let learning_rate = loop {
        let v = read_line(&format!("    Learning rate (default {}): ", d.learning_rate))
            .trim().parse::<f32>().unwrap_or(d.learning_rate);
        if v > 0.0 { break v; }
        println!("    ⚠  must be positive.");
    };
    let batch_size_fraction = loop {
        let v = read_line(&format!("    Batch size fraction (default {}): ", d.batch_size_fraction))
            .trim().parse::<f32>().unwrap_or(d.batch_size_fraction);
        if v > 0.0 && v <= 1.0 { break v; }
        println!("    ⚠  (0, 1] only.");
    };
    let epochs: u32 = read_line(&format!("    Epochs (default {}): ", d.epochs))
        .trim().parse().unwrap_or(d.epochs).max(1);
    let dense_units: u32 = read_line(&format!("    Hidden units (default {}): ", d.dense_units))
        .trim().parse().unwrap_or(d.dense_units).max(1);

    TrainingParams { learning_rate, batch_size_fraction, epochs, dense_units }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn config_flag_takes_path() {
        assert_eq!(config_arg(&args(&["--config", "lock.toml"])), Ok(Some(PathBuf::from("lock.toml"))));
        assert_eq!(config_arg(&args(&["--quick"])), Ok(None));
    }

    #[test]
    fn config_flag_without_path_is_error() {
        assert!(config_arg(&args(&["--config"])).is_err());
        assert!(config_arg(&args(&["--config", "--quick"])).is_err());
    }
}
