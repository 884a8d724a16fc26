//! Extractors that reject malformed requests with an [`AppError`](crate::AppError)
//! body instead of axum's plain-text rejections.

pub mod parsed_path;
pub mod validated_json;

pub use parsed_path::ParsedPath;
pub use validated_json::ValidatedJson;
