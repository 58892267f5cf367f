use std::hint::black_box;

use aec::double_talk_detector::DoubleTalkDetector;
use aec::nlms_filter::NlmsFilter;
use aec::{Config, EchoCanceller};
use iai_callgrind::{library_benchmark, library_benchmark_group, main};

fn test_frame(len: usize) -> (Vec<i16>, Vec<i16>) {
    let far: Vec<i16> = (0..len).map(|i| ((i * 37) % 2000) as i16 - 1000).collect();
    let near: Vec<i16> = far.iter().map(|&s| s / 2).collect();
    (far, near)
}

#[library_benchmark]
fn bench_process_fixed_point() {
    let config = Config {
        frame_size: 256,
        filter_length: 512,
        use_fixed_point: true,
        ..Config::default()
    };
    let mut aec = EchoCanceller::builder().config(config).build().unwrap();
    let (far, near) = test_frame(256);
    let mut out = vec![0i16; 256];
    aec.process(black_box(&far), black_box(&near), &mut out)
        .unwrap();
    black_box(&out);
}

#[library_benchmark]
fn bench_process_float() {
    let config = Config {
        frame_size: 256,
        filter_length: 512,
        use_fixed_point: false,
        ..Config::default()
    };
    let mut aec = EchoCanceller::builder().config(config).build().unwrap();
    let (far, near) = test_frame(256);
    let mut out = vec![0i16; 256];
    aec.process(black_box(&far), black_box(&near), &mut out)
        .unwrap();
    black_box(&out);
}

#[library_benchmark]
fn bench_nlms_sample_fixed() {
    let mut filter = NlmsFilter::new(512, 0.1, 1e-6, true);
    for i in 0..256i16 {
        black_box(filter.process_i16(i * 7, i * 3, true));
    }
}

#[library_benchmark]
fn bench_double_talk_update() {
    let mut dtd = DoubleTalkDetector::new(1.5, 0.3, 0.9, 3);
    let (far, near) = test_frame(256);
    black_box(dtd.update(black_box(&far), black_box(&near), 1));
}

library_benchmark_group!(
    name = engine;
    benchmarks = bench_process_fixed_point, bench_process_float
);

library_benchmark_group!(
    name = components;
    benchmarks = bench_nlms_sample_fixed, bench_double_talk_update
);

main!(library_benchmark_groups = engine, components);
