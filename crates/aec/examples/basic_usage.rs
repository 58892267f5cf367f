//! Minimal echo cancellation walkthrough on synthetic audio.
//!
//! The near end carries a scaled echo of the far end plus a small
//! disturbance; the canceller adapts over 50 frames and prints its
//! statistics as it converges.

use aec::{Config, EchoCanceller, Error};

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt().init();

    println!("aec demo - echo cancellation on a synthetic VoIP frame stream");

    let config = Config {
        sample_rate_hz: 16000,
        frame_size: 256,
        filter_length: 512,
        use_fixed_point: true,
        ..Config::default()
    };
    let frame_size = config.frame_size;
    let mut aec = EchoCanceller::builder().config(config).build()?;

    let mut far_end = vec![0i16; frame_size];
    let mut near_end = vec![0i16; frame_size];
    let mut output = vec![0i16; frame_size];

    println!("processing {frame_size}-sample frames...");

    for frame in 0..50usize {
        for i in 0..frame_size {
            let t = (frame * frame_size + i) as f32;
            // Two tones standing in for far-end speech.
            let far = 6000.0 * (t * 0.11).sin() + 3000.0 * (t * 0.043).sin();
            // Echo path: 0.3 gain, plus a little uncorrelated disturbance.
            let noise = ((i * 31) % 200) as f32 - 100.0;
            far_end[i] = far as i16;
            near_end[i] = (far * 0.3 + noise) as i16;
        }

        aec.process(&far_end, &near_end, &mut output)?;

        if frame % 10 == 0 {
            let stats = aec.stats();
            println!(
                "frame {frame:2} | latency: {:.4} ms/sample | ERLE: {:.1} dB",
                stats.latency_ms.unwrap_or(0.0),
                stats.erle_db.unwrap_or(0.0),
            );
        }
    }

    let stats = aec.stats();
    println!("done");
    println!(
        "  average latency: {:.4} ms/sample",
        stats.latency_ms.unwrap_or(0.0)
    );
    println!("  echo reduction:  {:.1} dB", stats.erle_db.unwrap_or(0.0));
    Ok(())
}
