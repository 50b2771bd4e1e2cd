use std::fs;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Dumps a Java `.class` file's structure.
#[derive(Parser)]
#[command(name = "classfile-core")]
struct Args {
    /// Path to the .class file to parse
    path: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();

    let buf = match fs::read(&args.path) {
        Ok(buf) => buf,
        Err(err) => {
            log::error!("failed to read {}: {}", args.path, err);
            return ExitCode::FAILURE;
        }
    };

    if !classfile_core::check(&buf) {
        log::warn!("{} does not probe as a class file; attempting to parse anyway", args.path);
    }

    let class_file = match classfile_core::parse(&buf, 0) {
        Ok(class_file) => class_file,
        Err(err) => {
            log::error!("failed to parse {}: {}", args.path, err);
            return ExitCode::FAILURE;
        }
    };

    match args.format {
        Format::Text => print!("{}", classfile_core::render::text::render(&class_file)),
        Format::Json => {
            let document = serde_json::json!({
                "class": classfile_core::render::json::render(&class_file),
                "views": classfile_core::render::json::render_views(&class_file),
            });
            println!("{}", document);
        }
    }

    ExitCode::SUCCESS
}
