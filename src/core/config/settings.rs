use serde::{Deserialize, Serialize};

/// Typed view of the merged `config.yml` + `secrets.yaml` + environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub app: AppSection,
    pub llm: LlmConfig,
    pub catalog: CatalogConfig,
    pub retrieval: RetrievalConfig,
    pub brand: BrandProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    /// Upper bound on raw query length, in characters.
    pub max_input_length: usize,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            max_input_length: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub completion_model: String,
    pub embedding_model: String,
    pub request_timeout_secs: u64,
    pub api_key: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            completion_model: "gemini-2.5-flash".to_string(),
            embedding_model: "text-embedding-004".to_string(),
            request_timeout_secs: 30,
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub supabase_url: String,
    pub supabase_key: String,
    pub products_table: String,
    pub match_function: String,
    pub request_timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_key: String::new(),
            products_table: "products".to_string(),
            match_function: "match_products".to_string(),
            request_timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Minimum similarity a candidate needs to be returned.
    pub match_threshold: f32,
    /// Result cap passed to the similarity search.
    pub match_count: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            match_threshold: 0.5,
            match_count: 5,
        }
    }
}

/// Domain context embedded in the expansion and synthesis prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandProfile {
    pub name: String,
    pub assistant_name: String,
    pub description: String,
    pub collections: Vec<String>,
    pub categories: Vec<String>,
    pub features: Vec<String>,
}

impl Default for BrandProfile {
    fn default() -> Self {
        Self {
            name: "Hunnit".to_string(),
            assistant_name: "Hunnit AI".to_string(),
            description: "a premium activewear brand known for comfort, style, and versatility"
                .to_string(),
            collections: vec![
                "Zen (Soft, Flare)".to_string(),
                "Safari Chic (Prints)".to_string(),
                "Cosmic Waves (Bold)".to_string(),
                "Epic Pop (Vibrant)".to_string(),
            ],
            categories: vec![
                "Leggings".to_string(),
                "Sports Bras".to_string(),
                "Crop Tops".to_string(),
                "Co-ord Sets".to_string(),
                "Shorts".to_string(),
                "Skorts".to_string(),
                "Jackets".to_string(),
            ],
            features: vec![
                "Moisture Wicking".to_string(),
                "4 Way Stretch".to_string(),
                "Pockets".to_string(),
                "High Waist".to_string(),
                "Buttery Soft".to_string(),
            ],
        }
    }
}
