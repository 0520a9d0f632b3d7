// ID card OCR service
// Reads card image paths and answers with the extracted fields as JSON

use clap::Parser;
use idcard_ocr::{
    config::ServiceConfig,
    processing::TesseractRecognizer,
    storage::open_sink,
    utils::IdCardError,
    IdCardProcessor,
};
use log::{error, info};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

fn render<T: Serialize>(value: &T, compact: bool) -> Result<String, serde_json::Error> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

fn handle_request(
    processor: &IdCardProcessor,
    image_path: &Path,
    config: &ServiceConfig,
    out: &mut impl Write,
) -> Result<(), IdCardError> {
    let rendered = match processor.process(image_path, config.binarize) {
        Ok(record) => render(&record, config.compact)?,
        Err(e) => {
            error!("Failed to process {}: {}", image_path.display(), e);
            render(&serde_json::json!({ "error": e.to_string() }), config.compact)?
        }
    };

    writeln!(out, "{}", rendered)?;
    out.flush()?;
    Ok(())
}

fn run(config: ServiceConfig) -> Result<(), IdCardError> {
    let recognizer = TesseractRecognizer::new(config.tessdata.as_deref(), &config.lang)?;
    let sink = open_sink(&config)?;
    let processor = IdCardProcessor::new(Box::new(recognizer), sink);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !config.images.is_empty() {
        for image_path in &config.images {
            handle_request(&processor, image_path, &config, &mut out)?;
        }
        return Ok(());
    }

    info!("Ready, reading image paths from stdin");
    for line in io::stdin().lock().lines() {
        let line = line?;
        let image_path = line.trim();
        if image_path.is_empty() {
            continue;
        }
        handle_request(&processor, Path::new(image_path), &config, &mut out)?;
    }

    info!("End of input, shutting down");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServiceConfig::parse();
    info!("Starting idcard-ocr (database: {})", config.database);

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
