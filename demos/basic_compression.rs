use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use huffpack::frame::{read_frame, write_frame};
use huffpack::{decode, encode, FrameLimits};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sample.huff");

    // Compress
    let (table, stream) = encode(sample_text.as_bytes())?;
    println!("Code table ({} symbols):", table.len());
    for (symbol, code) in table.iter() {
        println!("  {:?} -> {}", symbol as char, code);
    }

    let mut writer = BufWriter::new(File::create(&path)?);
    write_frame(&mut writer, &table, &stream)?;
    writer.flush()?;
    drop(writer);

    let compressed_size = std::fs::metadata(&path)?.len();
    let compression_ratio = compressed_size as f64 / sample_text.len() as f64;
    println!(
        "Compressed {} bytes to {} bytes ({:.1}% of original, {} payload bits)",
        sample_text.len(),
        compressed_size,
        compression_ratio * 100.0,
        stream.total_bits()
    );

    // Decompress
    let mut reader = BufReader::new(File::open(&path)?);
    let (table, stream) = read_frame(&mut reader, &FrameLimits::default())?;
    let decompressed = decode(&table, &stream)?;

    if decompressed != sample_text.as_bytes() {
        return Err("Decompression verification failed".into());
    }
    println!("Decompression successful, data matches exactly.");

    Ok(())
}
