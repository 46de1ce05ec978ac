pub mod client;
pub mod image;
pub mod text;
pub mod types;

pub use client::GeminiHttpClient;
pub use image::GeminiImageClient;
pub use text::GeminiTextClient;

/// Adds a `with_base_url` builder to a client wrapping a `GeminiHttpClient` in `http`.
macro_rules! impl_with_gemini_base_url {
    ($ty:ty) => {
        impl $ty {
            pub fn with_base_url(mut self, base_url: String) -> Self {
                self.http = self.http.with_base_url(base_url);
                self
            }
        }
    };
}
pub(crate) use impl_with_gemini_base_url;
