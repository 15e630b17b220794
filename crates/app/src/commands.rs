//! Command handlers.
//!
//! Each handler owns the plumbing around the codec (reading input, writing
//! payloads) and hands the codec only text, bits, and tables.

use crate::config::{InputSource, Operation};
use crate::input_gen::generate_sample_text;
use crate::payload::PayloadDocument;
use anyhow::{bail, Context, Result};
use huffstring_core::metrics::CompressionStats;
use huffstring_core::TextCodec;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(codec: &dyn TextCodec, operation: Operation) -> Result<()> {
    match operation {
        Operation::Compress { input, output, stats } => compress(codec, &input, output, stats),
        Operation::Decompress { payload, output } => decompress(codec, &payload, output),
        Operation::Dictionary { payload } => dictionary(&payload),
        Operation::Stats { input } => stats(codec, &input),
        Operation::Demo { seed, size_symbols } => demo(codec, seed, size_symbols),
    }
}

fn compress(
    codec: &dyn TextCodec,
    input: &InputSource,
    output: Option<PathBuf>,
    show_stats: bool,
) -> Result<()> {
    let text = input.read()?;
    let payload = codec.compress(&text).context("compression failed")?;
    info!(bits = payload.bit_len(), "compressed input");

    let document = PayloadDocument::from_payload(&payload);
    match output {
        Some(path) => document.write(&path)?,
        None => println!("{}", document.to_json()?),
    }

    if show_stats {
        let stats = CompressionStats::measure(&text, &payload)?;
        eprint!("{}", stats.export_text());
    }
    Ok(())
}

fn decompress(codec: &dyn TextCodec, payload_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let payload = PayloadDocument::read(payload_path)?.into_payload()?;
    let text = codec
        .decompress(payload.bits(), payload.table())
        .context("decompression failed")?;
    info!(symbols = text.chars().count(), "decompressed payload");

    match output {
        Some(path) => std::fs::write(&path, &text)
            .with_context(|| format!("failed to write output {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn dictionary(payload_path: &Path) -> Result<()> {
    let payload = PayloadDocument::read(payload_path)?.into_payload()?;

    for (symbol, code) in payload.table().iter() {
        println!("{}\t{}", symbol.escape_debug(), code);
    }
    Ok(())
}

fn stats(codec: &dyn TextCodec, input: &InputSource) -> Result<()> {
    let text = input.read()?;
    let payload = codec.compress(&text).context("compression failed")?;

    CompressionStats::measure(&text, &payload)?.print_summary();
    Ok(())
}

fn demo(codec: &dyn TextCodec, seed: u64, size_symbols: usize) -> Result<()> {
    let text = generate_sample_text(seed, size_symbols);
    info!(seed, size_symbols, "generated sample text");

    let payload = codec.compress(&text).context("compression failed")?;
    let restored = codec
        .decompress(payload.bits(), payload.table())
        .context("decompression failed")?;

    if restored != text {
        bail!(
            "round trip mismatch: {} symbols in, {} symbols out",
            text.chars().count(),
            restored.chars().count()
        );
    }

    CompressionStats::measure(&text, &payload)?.print_summary();
    println!();
    println!("✓ Round trip verified ({} symbols, seed {})", size_symbols, seed);
    Ok(())
}
