// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures_util::poll;
use wisssh_core::protocol::paths;

use super::*;
use crate::api::{ApiResponse, Body};
use crate::test_helpers::{json_body, logged_in_session, status, user, wish, MockTransport};

/// Serves every image with its own path as the body; fails `images/covers/bad*`.
fn image_backend() -> MockTransport {
    MockTransport::new(|request, _| {
        if request.path.starts_with("images/covers/bad") {
            return status(404);
        }
        Ok(ApiResponse::new(200, request.path.clone().into_bytes()))
    })
}

fn pipeline(transport: &MockTransport) -> ImagePipeline<MockTransport> {
    let api = Arc::new(ApiClient::new(transport.clone(), logged_in_session()));
    ImagePipeline::new(api, DEFAULT_BATCH_SIZE)
}

fn covered(id: &str) -> Wish {
    let mut w = wish(id, "me0001");
    w.image_extension = Some("jpg".into());
    w
}

fn image_calls(transport: &MockTransport) -> Vec<String> {
    transport
        .calls()
        .into_iter()
        .map(|c| c.path)
        .filter(|p| p.starts_with("images/"))
        .collect()
}

#[tokio::test]
async fn test_tick_loads_and_creates_handles() {
    let transport = image_backend();
    let images = pipeline(&transport);

    assert!(images.observe_wish(&covered("AbC123")));
    assert_eq!(images.state("AbC123"), ImageState::Queued);

    assert_eq!(images.tick().await, 1);

    assert_eq!(images.state("AbC123"), ImageState::Loaded);
    let image = images.image("AbC123").unwrap();
    assert_eq!(*image.blob.bytes, b"images/covers/AbC123.jpg".to_vec());
    assert_eq!(image.blob.mime, "image/jpeg");
    assert!(images.is_live(&image.url));
}

#[tokio::test]
async fn test_tick_takes_at_most_one_batch_prior_first() {
    let transport = image_backend();
    let images = pipeline(&transport);
    for i in 0..10 {
        images.observe_wish(&covered(&format!("wish{:02}", i)));
    }
    images.promote(&["wish09", "wish08"]);

    assert_eq!(images.tick().await, DEFAULT_BATCH_SIZE);

    let fetched = image_calls(&transport);
    assert_eq!(fetched.len(), DEFAULT_BATCH_SIZE);
    assert_eq!(fetched[0], "images/covers/wish08.jpg");
    assert_eq!(fetched[1], "images/covers/wish09.jpg");
    assert_eq!(images.pending(), 2);
    assert_eq!(images.state("wish06"), ImageState::Queued);
    assert_eq!(images.state("wish07"), ImageState::Queued);
}

#[tokio::test]
async fn test_overlapping_ticks_do_not_dispatch() {
    let transport = image_backend();
    let images = pipeline(&transport);
    for i in 0..12 {
        images.observe_wish(&covered(&format!("wish{:02}", i)));
    }

    let mut first = Box::pin(images.tick());
    assert!(poll!(&mut first).is_pending());
    assert_eq!(images.state("wish00"), ImageState::Loading);

    // A second tick while the first batch is loading does nothing
    assert_eq!(images.tick().await, 0);
    assert_eq!(image_calls(&transport).len(), DEFAULT_BATCH_SIZE);

    assert_eq!(first.await, DEFAULT_BATCH_SIZE);
    assert_eq!(images.tick().await, 4);
}

#[tokio::test]
async fn test_failed_fetch_returns_to_unqueued() {
    let transport = image_backend();
    let images = pipeline(&transport);
    let bad = covered("bad001");

    images.observe_wish(&bad);
    assert_eq!(images.tick().await, 0);

    assert_eq!(images.state("bad001"), ImageState::Unqueued);
    assert!(images.url("bad001").is_none());
    // Eligible again on the next sighting
    assert!(images.observe_wish(&bad));
}

#[tokio::test]
async fn test_loaded_image_is_not_requeued_until_stale() {
    let transport = image_backend();
    let images = pipeline(&transport);
    let mut w = covered("AbC123");

    images.observe_wish(&w);
    images.tick().await;
    let old = images.url("AbC123").unwrap();
    assert!(!images.observe_wish(&w));

    w.last_modified_at = Utc::now() + chrono::Duration::seconds(5);
    assert!(images.observe_wish(&w));
    assert!(!images.is_live(&old));
    assert_eq!(images.state("AbC123"), ImageState::Queued);

    images.tick().await;
    let new = images.url("AbC123").unwrap();
    assert_ne!(old, new);
    assert_eq!(images.live_handles(), 1);
}

#[tokio::test]
async fn test_entity_without_image_releases_handle() {
    let transport = image_backend();
    let images = pipeline(&transport);
    let mut alice = user("me0001", "alice");
    alice.image_extension = Some("png".into());

    images.observe_user(&alice);
    images.tick().await;
    let url = images.url("me0001").unwrap();
    assert_eq!(image_calls(&transport), vec!["images/avatars/me0001.png"]);

    alice.image_extension = None;
    assert!(!images.observe_user(&alice));
    assert!(!images.is_live(&url));
    assert_eq!(images.state("me0001"), ImageState::Unqueued);
}

#[tokio::test]
async fn test_upload_sends_multipart_and_requeues() {
    let transport = image_backend();
    let images = pipeline(&transport);
    let mut alice = user("me0001", "alice");
    alice.image_extension = Some("png".into());
    images.observe_user(&alice);
    images.tick().await;
    let old = images.url("me0001").unwrap();

    images
        .upload(ImageKind::Avatar, "me0001", "webp", b"RIFF".to_vec())
        .await
        .unwrap();

    let upload = transport
        .calls()
        .into_iter()
        .find(|c| c.path == "images/post/avatars/me0001")
        .unwrap();
    match upload.body {
        Body::Multipart(part) => {
            assert_eq!(part.file_name, "me0001.webp");
            assert_eq!(part.mime, "image/webp");
            assert_eq!(part.bytes, b"RIFF".to_vec());
        }
        other => panic!("expected multipart body, got {other:?}"),
    }
    assert!(!images.is_live(&old));
    assert_eq!(images.state("me0001"), ImageState::Prior);
}

#[tokio::test]
async fn test_delete_revokes_handle() {
    let transport = image_backend();
    let images = pipeline(&transport);
    images.observe_wish(&covered("AbC123"));
    images.tick().await;
    let url = images.url("AbC123").unwrap();

    images.delete(ImageKind::Cover, "AbC123").await.unwrap();

    assert!(transport
        .calls()
        .iter()
        .any(|c| c.path == "images/delete/covers/AbC123"));
    assert!(!images.is_live(&url));
    assert_eq!(images.state("AbC123"), ImageState::Unqueued);
}

#[tokio::test]
async fn test_forget_while_loading_drops_fetched_image() {
    let transport = image_backend();
    let images = pipeline(&transport);
    images.observe_wish(&covered("AbC123"));

    let mut batch = Box::pin(images.tick());
    assert!(poll!(&mut batch).is_pending());
    assert_eq!(images.state("AbC123"), ImageState::Loading);

    images.forget("AbC123");

    assert_eq!(batch.await, 0);
    assert_eq!(images.state("AbC123"), ImageState::Unqueued);
    assert!(images.url("AbC123").is_none());
    assert_eq!(images.live_handles(), 0);
}

#[tokio::test]
async fn test_copy_wish_cover_queues_target() {
    let transport = image_backend();
    let images = pipeline(&transport);

    images
        .copy_wish_cover("AbC123", "New456", "jpg")
        .await
        .unwrap();

    let copy = transport
        .calls()
        .into_iter()
        .find(|c| c.path == paths::COPY_WISH_COVER)
        .unwrap();
    assert_eq!(
        json_body(&copy),
        serde_json::json!({"sourceId": "AbC123", "targetId": "New456"})
    );
    assert_eq!(images.state("New456"), ImageState::Prior);
}

#[tokio::test]
async fn test_failed_upload_keeps_current_image() {
    let transport = MockTransport::new(|_, _| status(413));
    let images = pipeline(&transport);

    let err = images
        .upload(ImageKind::Cover, "AbC123", "png", vec![0; 16])
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(413));
    assert_eq!(images.state("AbC123"), ImageState::Unqueued);
}

#[tokio::test]
async fn test_reset_revokes_all_handles() {
    let transport = image_backend();
    let images = pipeline(&transport);
    images.observe_wish(&covered("AbC123"));
    images.observe_wish(&covered("Def456"));
    images.tick().await;
    images.observe_wish(&covered("Ghi789"));

    images.reset();

    assert_eq!(images.live_handles(), 0);
    assert_eq!(images.pending(), 0);
    assert_eq!(images.state("Ghi789"), ImageState::Unqueued);
}

#[tokio::test]
async fn test_poller_drains_queue() {
    let transport = image_backend();
    let images = Arc::new(pipeline(&transport));
    for i in 0..10 {
        images.observe_wish(&covered(&format!("wish{:02}", i)));
    }

    let poller = images.spawn_poller(Duration::from_millis(5));
    for _ in 0..200 {
        if images.pending() == 0 && images.state("wish09") == ImageState::Loaded {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    poller.abort();

    assert_eq!(images.live_handles(), 10);
}
