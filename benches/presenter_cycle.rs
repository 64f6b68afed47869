// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for the presenter state machine.
//!
//! Measures the cost of:
//! - A full show/hide cycle on virtual time
//! - A cycle with a frame-based indicator ticking while mounted

use criterion::{criterion_group, criterion_main, Criterion};
use iced_blocker::domain::timing::FrameInterval;
use iced_blocker::indicator::{Frame, FrameAnimation, FrameSet};
use iced_blocker::presenter::PresentationRequest;
use iced_blocker::renderer::RecordingRenderer;
use iced_blocker::sim::Simulation;
use image_rs::RgbaImage;
use std::hint::black_box;

fn bench_spinner_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("presenter_cycle");
    let request = PresentationRequest::builder()
        .display_threshold_ms(500)
        .minimum_display_time_ms(1000)
        .build();

    group.bench_function("spinner", |b| {
        b.iter(|| {
            let mut sim = Simulation::new(RecordingRenderer::new());
            sim.request_show(request.clone());
            sim.advance_to(100);
            sim.request_hide();
            black_box(sim.advance_to(2000));
        });
    });

    group.finish();
}

fn bench_frame_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("presenter_cycle");
    let frames = FrameSet::from_frames(
        (0..6)
            .map(|i| Frame::new(format!("ic_loader_{i}"), RgbaImage::new(8, 8)))
            .collect(),
    );
    let request = PresentationRequest::builder()
        .minimum_display_time_ms(3000)
        .frames(FrameAnimation::new(frames).with_interval(FrameInterval::new(100)))
        .build();

    group.bench_function("frames", |b| {
        b.iter(|| {
            let mut sim = Simulation::new(RecordingRenderer::new());
            sim.request_show(request.clone());
            sim.request_hide();
            black_box(sim.advance_to(5000));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_spinner_cycle, bench_frame_cycle);
criterion_main!(benches);
