pub mod answer;
pub mod extract;
pub mod fetch;
pub mod ollama;
pub mod session;

pub use answer::{PageAnswerer, PageAnswererBuilder};
pub use extract::PageContent;
pub use fetch::{FetchError, PageFetcher, normalize_url};
pub use ollama::{OllamaClient, OllamaClientBuilder, OllamaClientTrait, OllamaError};
