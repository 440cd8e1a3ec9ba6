use auroragen::{DataUri, GeminiClient, GeminiConfig, ImageToImageRequest};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    auroragen::logger::init()?;

    let path = env::args()
        .nth(1)
        .ok_or("Usage: transform <path-to-image> [instruction]")?;
    let instruction = env::args()
        .nth(2)
        .unwrap_or_else(|| "Make it look like a vintage photograph".to_string());

    let source = DataUri::from_path(&path)?;

    let api_key = env::var("GEMINI_API_KEY")?;
    let client = GeminiClient::new(GeminiConfig::new().with_api_key(api_key))?;

    let request = ImageToImageRequest {
        source_image: source.to_string(),
        prompt: instruction,
        model_id: None,
    };

    let response = client.image().image_to_image(request).await?;
    println!("model: {}", response.model);

    match DataUri::parse(&response.transformed_image) {
        Ok(uri) => {
            fs::write("transformed.png", uri.decode()?)?;
            println!("saved transformed.png ({})", uri.mime_type);
        }
        Err(_) => println!("image reference: {}", response.transformed_image),
    }

    Ok(())
}
