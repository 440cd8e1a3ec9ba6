use auroragen::{DataUri, GeminiClient, GeminiConfig, TextToImageRequest};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded"),
        Err(_) => log::warn!("⚠️  No .env file found"),
    }
    auroragen::logger::init()?;
    let api_key = env::var("GEMINI_API_KEY")?;
    let config = GeminiConfig::new().with_api_key(api_key);

    let client = GeminiClient::new(config)?;
    let request = TextToImageRequest {
        prompt: "A stunning castle on a floating island, digital art".to_string(),
        model_id: None,
    };

    let response = client.image().text_to_image(request).await?;
    println!("model: {}", response.model);

    match DataUri::parse(&response.image_url) {
        Ok(uri) => {
            fs::write("generated.png", uri.decode()?)?;
            println!("saved generated.png ({})", uri.mime_type);
        }
        Err(_) => println!("image reference: {}", response.image_url),
    }

    Ok(())
}
