use image_store_server::create_local_app;
use std::error::Error;
use std::net::SocketAddr;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Local disk storage with in-memory metadata
    let services = create_local_app("./uploads").await?;
    let app = services.router();

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = TcpListener::bind(addr).await?;

    println!("Image Store Server starting on http://{}", addr);
    println!("\nAvailable endpoints:");
    println!("  GET    /health                               - Health check");
    println!("  POST   /api/v1/images                        - Upload images (multipart)");
    println!("  DELETE /api/v1/images                        - Delete an image");
    println!("  GET    /api/v1/images?imagePath=...          - Look up an image");
    println!("  GET    /api/v1/images/exists?imagePath=...   - Check an image exists");
    println!("  GET    /api/v1/images/types/:imageType       - List images of a type");
    println!("  GET    /images/*                             - Stored image files");
    println!("\nExample usage with curl:");
    println!("  # Upload two post images");
    println!("  curl -F imageType=POST -F files=@a.jpg -F files=@b.png \\");
    println!("       http://localhost:3000/api/v1/images");
    println!("  # Delete one of them");
    println!("  curl -X DELETE http://localhost:3000/api/v1/images \\");
    println!("       -H 'Content-Type: application/json' \\");
    println!("       -d '{{\"imageDirectory\":\"posts\",\"imagePath\":\"<url>\"}}'");
    println!("\nPress Ctrl+C to stop the server");

    tracing::info!("Server listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
