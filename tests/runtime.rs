// SPDX-License-Identifier: MPL-2.0
//! Presenter running on the tokio driver with paused time.

use iced_blocker::error::Error;
use iced_blocker::presenter::{PhaseKind, PresentationRequest};
use iced_blocker::renderer::RecordingRenderer;
use iced_blocker::runtime;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn request(threshold: u32, minimum: u32) -> PresentationRequest {
    PresentationRequest::builder()
        .display_threshold_ms(threshold)
        .minimum_display_time_ms(minimum)
        .build()
}

#[tokio::test(start_paused = true)]
async fn threshold_and_minimum_are_respected() {
    let renderer = RecordingRenderer::new();
    let (handle, task) = runtime::spawn(renderer.clone());

    handle.request_show(request(500, 1000)).unwrap();
    sleep(Duration::from_millis(100)).await;
    handle.request_hide().unwrap();

    sleep(Duration::from_millis(350)).await; // t = 450
    assert_eq!(renderer.mount_count(), 0);

    sleep(Duration::from_millis(100)).await; // t = 550
    assert_eq!(renderer.mount_count(), 1);
    assert_eq!(handle.phase().await.unwrap(), PhaseKind::PendingHide);

    sleep(Duration::from_millis(900)).await; // t = 1450
    assert_eq!(renderer.unmount_count(), 0);

    sleep(Duration::from_millis(100)).await; // t = 1550
    assert_eq!(renderer.unmount_count(), 1);
    assert_eq!(handle.phase().await.unwrap(), PhaseKind::Idle);

    handle.shutdown().unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn handles_from_other_tasks_share_one_presenter() {
    let renderer = RecordingRenderer::new();
    let (handle, task) = runtime::spawn(renderer.clone());

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let handle = handle.clone();
            tokio::spawn(async move {
                handle.request_show(request(50, 100)).unwrap();
            })
        })
        .collect();
    for worker in workers {
        worker.await.unwrap();
    }

    sleep(Duration::from_millis(60)).await;
    assert_eq!(renderer.mount_count(), 1);

    handle.request_hide().unwrap();
    sleep(Duration::from_millis(200)).await;
    assert_eq!(renderer.unmount_count(), 1);

    handle.shutdown().unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn force_close_through_handle() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let renderer = RecordingRenderer::new();
    let (handle, task) = runtime::spawn(renderer.clone());

    handle
        .request_show(
            PresentationRequest::builder()
                .minimum_display_time_ms(5000)
                .closeable(true)
                .on_force_close(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .build(),
        )
        .unwrap();
    sleep(Duration::from_millis(10)).await;
    handle.force_close().unwrap();
    assert_eq!(handle.phase().await.unwrap(), PhaseKind::Idle);

    assert_eq!(renderer.unmount_count(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    handle.shutdown().unwrap();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn closed_runtime_reports_error() {
    let (handle, task) = runtime::spawn(RecordingRenderer::new());
    handle.shutdown().unwrap();
    task.await.unwrap();

    assert!(matches!(handle.request_show(request(0, 0)), Err(Error::RuntimeClosed)));
    assert!(matches!(handle.phase().await, Err(Error::RuntimeClosed)));
}
