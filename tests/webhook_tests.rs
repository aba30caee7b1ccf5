use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use image_store_server::{
    ports::notification::{Embed, EmbedField},
    DiscordWebhook, FileStorage, ImageError, ImageEventNotifier, ImageService,
    ImageServiceBuilder, InMemoryImageRepository, LocalFileStorage, WebhookMessage,
    WebhookSender,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct Captured {
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn capture(State(captured): State<Captured>, Json(body): Json<Value>) -> StatusCode {
    captured.bodies.lock().await.push(body);
    StatusCode::NO_CONTENT
}

async fn reject() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Start a throwaway receiver and return its webhook URL
async fn start_receiver() -> (String, Captured) {
    let captured = Captured::default();
    let app = Router::new()
        .route("/webhook", post(capture))
        .route("/broken", post(reject))
        .with_state(captured.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), captured)
}

fn sample_message() -> WebhookMessage {
    WebhookMessage {
        content: "Test Content".to_string(),
        embeds: vec![Embed {
            title: "Test Title".to_string(),
            fields: vec![EmbedField::new("Field Name", "Field Value", true)],
        }],
    }
}

#[tokio::test]
async fn test_discord_webhook_posts_json() {
    let (base, captured) = start_receiver().await;
    let webhook = DiscordWebhook::new(format!("{}/webhook", base));

    webhook.send(&sample_message()).await;

    let bodies = captured.bodies.lock().await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["content"], "Test Content");
    assert_eq!(bodies[0]["embeds"][0]["title"], "Test Title");
    assert_eq!(bodies[0]["embeds"][0]["fields"][0]["name"], "Field Name");
    assert_eq!(bodies[0]["embeds"][0]["fields"][0]["inline"], true);
}

#[tokio::test]
async fn test_discord_webhook_swallows_failures() {
    let (base, captured) = start_receiver().await;

    // Error status from the receiver
    DiscordWebhook::new(format!("{}/broken", base))
        .send(&sample_message())
        .await;

    // Nothing listening
    DiscordWebhook::new("http://127.0.0.1:9/webhook")
        .send(&sample_message())
        .await;

    assert!(captured.bodies.lock().await.is_empty());
}

#[tokio::test]
async fn test_failed_delete_is_relayed() {
    let (base, captured) = start_receiver().await;
    let dir = tempfile::tempdir().unwrap();

    let service = ImageServiceBuilder::new()
        .repository(Arc::new(InMemoryImageRepository::new()))
        .storage(Arc::new(LocalFileStorage::new(dir.path()).unwrap()))
        .publisher(Arc::new(ImageEventNotifier::new(Arc::new(
            DiscordWebhook::new(format!("{}/webhook", base)),
        ))))
        .build()
        .unwrap();

    // A path escaping the storage root cannot be deleted
    let result = service
        .delete_image(Some("/images/../outside.jpg"), Some("/images/new.jpg"))
        .await;

    assert!(matches!(result, Err(ImageError::Storage(_))));

    let bodies = captured.bodies.lock().await;
    assert_eq!(bodies.len(), 1);
    let embed = &bodies[0]["embeds"][0];
    assert_eq!(embed["title"], "Image delete failed");
    assert_eq!(embed["fields"][0]["name"], "Error message");
    assert_eq!(embed["fields"][0]["value"], "local file delete failed");
    assert_eq!(embed["fields"][1]["value"], "/images/../outside.jpg");
    assert_eq!(embed["fields"][3]["name"], "Timestamp");
}

#[tokio::test]
async fn test_failed_upload_is_not_relayed() {
    let (base, captured) = start_receiver().await;
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalFileStorage::new(dir.path()).unwrap();
    // A regular file where the prefix directory should go
    std::fs::write(dir.path().join("posts"), b"not a dir").unwrap();
    assert_eq!(storage.name(), "local");

    let service = ImageServiceBuilder::new()
        .repository(Arc::new(InMemoryImageRepository::new()))
        .storage(Arc::new(storage))
        .publisher(Arc::new(ImageEventNotifier::new(Arc::new(
            DiscordWebhook::new(format!("{}/webhook", base)),
        ))))
        .build()
        .unwrap();

    let file = image_store_server::UploadFile::builder()
        .file_name("a.jpg")
        .content_type("image/jpeg")
        .data(b"jpeg".to_vec())
        .build();
    let result = service
        .upload_images(&[file], "/images/posts", image_store_server::ImageType::Post)
        .await;

    assert!(matches!(result, Err(ImageError::Storage(_))));
    assert!(captured.bodies.lock().await.is_empty());
}
