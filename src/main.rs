use log::{error, info, warn};
use std::env;
use tokio::io::{AsyncBufReadExt, BufReader};

use rust_sigfox_decoder::config::{DecoderConfig, OutputFormat};
use rust_sigfox_decoder::decoder::decode_raw_frame;
use rust_sigfox_decoder::models::RawFrame;
use rust_sigfox_decoder::utils::{describe_source, parse_frame_line, summarize};

/// Running count of frame outcomes
#[derive(Debug, Default)]
struct FrameTally {
    decoded: usize,
    failed: usize,
}

/// Decode one frame and emit the result in the configured format
fn process_frame(frame: &RawFrame, config: &DecoderConfig, tally: &mut FrameTally) {
    let decoded = match decode_raw_frame(frame) {
        Ok(decoded) => decoded,
        Err(e) => {
            error!("Failed to decode frame ({}): {}", describe_source(frame), e);
            tally.failed += 1;
            return;
        }
    };
    tally.decoded += 1;

    match config.output {
        OutputFormat::Text => {
            info!("Decoded frame ({})", describe_source(frame));
            for line in summarize(&decoded) {
                info!("{}", line);
            }
        }
        OutputFormat::Json => match serde_json::to_string(&decoded) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to serialize decoded frame: {}", e),
        },
    }
}

/// Read frames from stdin, one per line, until EOF
async fn read_stdin_frames(
    config: &DecoderConfig,
    tally: &mut FrameTally,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Reading frames from stdin");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match parse_frame_line(&line, config) {
            Ok(frame) => process_frame(&frame, config, tally),
            Err(e) => {
                error!("Skipping unreadable frame line '{}': {}", line.trim(), e);
                tally.failed += 1;
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match DecoderConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let mut tally = FrameTally::default();
    let args: Vec<String> = env::args().skip(1).collect();

    if args.is_empty() {
        // Stop reading on Ctrl+C
        let (tx, mut rx) = tokio::sync::oneshot::channel();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl+C: {}", e);
                return;
            }
            let _ = tx.send(());
        });

        tokio::select! {
            result = read_stdin_frames(&config, &mut tally) => {
                if let Err(e) = result {
                    error!("Failed to read frames from stdin: {}", e);
                    return Err(e);
                }
            }
            _ = &mut rx => {
                info!("Interrupted by user. Stopping.");
            }
        }
    } else {
        for arg in &args {
            match parse_frame_line(arg, &config) {
                Ok(frame) => process_frame(&frame, &config, &mut tally),
                Err(e) => {
                    error!("Skipping unreadable frame argument '{}': {}", arg, e);
                    tally.failed += 1;
                }
            }
        }
    }

    info!(
        "Frames decoded: {}, failed: {}",
        tally.decoded, tally.failed
    );

    if config.strict && tally.failed > 0 {
        return Err(format!("{} frame(s) failed to decode", tally.failed).into());
    }

    Ok(())
}
