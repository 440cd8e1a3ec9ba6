use auroragen::{DataUri, GeminiClient, GeminiConfig, ImageClient, ImagePrompt, Studio};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file first
    match dotenv::dotenv() {
        Ok(_) => log::info!("✅ .env file loaded successfully"),
        Err(_) => log::warn!("⚠️  No .env file found, using system environment variables"),
    }

    auroragen::logger::init_with_config(
        auroragen::logger::LoggerConfig::development()
            .with_level(auroragen::logger::LogLevel::Debug),
    )?;

    auroragen::logger::log_startup_info("auroragen", env!("CARGO_PKG_VERSION"));

    log::info!("🔍 Checking Gemini environment...");

    // Check the key (without printing the actual value for security)
    match env::var("GEMINI_API_KEY").or_else(|_| env::var("GOOGLE_API_KEY")) {
        Ok(key) => {
            log::info!("✅ Gemini API key found in environment");
            log::debug!("API key starts with: {}...", &key[..5.min(key.len())]);
        }
        Err(_) => {
            log::warn!("⚠️  No GEMINI_API_KEY or GOOGLE_API_KEY in environment");
            log::error!("❌ This will cause client initialization to fail");
        }
    }

    let config = GeminiConfig::from_env();
    auroragen::logger::log_config_info(&config);

    log::info!("🖼️  Available image generation models:");
    for model in ImageClient::supported_models() {
        log::info!("  {} - {} ({})", model.id, model.name, model.provider);
    }

    log::info!("🔄 Creating Gemini client...");
    let client = match GeminiClient::new(config) {
        Ok(client) => {
            log::info!("✅ Gemini client initialized successfully");
            client
        }
        Err(e) => {
            log::error!("❌ Failed to initialize Gemini client: {}", e);
            return Err(e.into());
        }
    };

    let mut studio = Studio::new(client);

    // Test 1: Text to image
    let base_prompt = env::args()
        .nth(1)
        .unwrap_or_else(|| "A stunning castle on a floating island, digital art".to_string());
    log::info!("🎨 Generating from prompt: {}", base_prompt);

    let prompt = ImagePrompt::new(base_prompt).with_creativity(0.5);

    let timer = auroragen::logger::timer("text-to-image");
    let result = studio.generate(&prompt).await;
    timer.stop();

    match result {
        Ok(record) => {
            log::info!("✅ Image generation successful!");
            log::info!("📝 Full prompt: {}", record.full_prompt);
            save_image(&record.url, "generated");
        }
        Err(e) => {
            log::error!("❌ Image generation failed: {}", e);
            log::warn!("💡 Check your API key and whether the preview model is enabled");
        }
    }

    log::info!("---");

    // Test 2: Image to image, when a source file is given
    if let Some(path) = env::args().nth(2) {
        log::info!("🖌️  Transforming source image: {}", path);

        match DataUri::from_path(&path) {
            Ok(source) => {
                let transform_prompt =
                    ImagePrompt::new("Give it a cinematic, dramatic look").with_creativity(0.7);

                let timer = auroragen::logger::timer("image-to-image");
                let result = studio.transform(&source, &transform_prompt).await;
                timer.stop();

                match result {
                    Ok(record) => {
                        log::info!("✅ Image transformation successful!");
                        save_image(&record.url, "transformed");
                    }
                    Err(e) => {
                        log::error!("❌ Image transformation failed: {}", e);
                    }
                }
            }
            Err(e) => {
                log::error!("❌ Failed to load source image: {}", e);
            }
        }

        log::info!("---");
    }

    log::info!("🎉 Done! {} image(s) in the session gallery", studio.gallery().len());
    for record in studio.gallery().iter() {
        log::info!("   [{}] {}", record.created_at.format("%H:%M:%S"), record.base_prompt);
    }

    Ok(())
}

// Writes a data URI result to a timestamped file; file URIs are only logged.
fn save_image(url: &str, label: &str) {
    match DataUri::parse(url) {
        Ok(uri) => {
            let extension = uri.mime_type.split('/').last().unwrap_or("png");
            let filename = format!("{}_{}.{}", label, chrono::Utc::now().timestamp(), extension);

            match uri.decode() {
                Ok(bytes) => match fs::write(&filename, bytes) {
                    Ok(_) => {
                        log::info!("💾 Image saved to: {}", filename);
                    }
                    Err(e) => {
                        log::error!("❌ Failed to save image: {}", e);
                    }
                },
                Err(e) => {
                    log::error!("❌ Failed to decode base64 image: {}", e);
                }
            }
        }
        Err(_) => {
            log::info!("🔗 Image available at: {}", url);
        }
    }
}
