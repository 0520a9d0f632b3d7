use clap::Parser;
use idcard_ocr::{models::RecognizedText, utils::IdCardError, IdCardProcessor};
use std::path::PathBuf;

/// Run field extraction on a saved OCR text dump, without OCR or storage.
#[derive(Parser, Debug)]
#[command(name = "extract_text")]
struct Args {
    /// Text file with one recognized line per line
    input: PathBuf,
}

fn main() -> Result<(), IdCardError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.input)?;
    let text = RecognizedText::from_text(&raw);
    eprintln!("Read {} lines from {}", text.len(), args.input.display());

    let record = IdCardProcessor::extract_record(&text);
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
