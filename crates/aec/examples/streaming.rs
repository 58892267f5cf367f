//! Simulated real-time render/capture loop through the stream adapter.
//!
//! No audio I/O: frames are synthetic, and a 10 ms sleep stands in for the
//! audio callback cadence.

use std::thread;
use std::time::Duration;

use aec::{Config, Error, StreamAdapter};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt().init();

    let config = Config {
        sample_rate_hz: 16000,
        frame_size: 160,
        filter_length: 512,
        use_fixed_point: true,
        ..Config::default()
    };
    let mut adapter = StreamAdapter::new(config, 10)?;
    let frame_size = adapter.frame_size();

    println!("starting simulated real-time demo (no audio I/O)");
    println!("processing 100 frames of {frame_size} samples, cancellation enabled");

    let far = vec![1000i16; frame_size];
    let mut capture = vec![2000i16; frame_size];

    for frame in 0..100 {
        adapter.process_render(&far)?;
        adapter.process_capture(&mut capture)?;

        if frame % 25 == 0 {
            let stats = adapter.stats();
            println!(
                "frame {frame:3} - ERLE: {:.1} dB, latency: {:.4} ms/sample",
                stats.erle_db.unwrap_or(0.0),
                stats.latency_ms.unwrap_or(0.0),
            );
        }
        thread::sleep(Duration::from_millis(10));
    }

    println!("demo finished");
    Ok(())
}
