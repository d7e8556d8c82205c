use axum::response::Response;
use http_body_util::BodyExt;
use url::form_urlencoded;

/// Route generating a QR code for `input`
pub fn generate_route(input: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(input.as_bytes()).collect();
    format!("/generate-qr/?url={encoded}")
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Decode a stored PNG into a grayscale image
pub fn decode_png(png: &[u8]) -> image::GrayImage {
    image::load_from_memory_with_format(png, image::ImageFormat::Png)
        .expect("Stored object is not a PNG")
        .to_luma8()
}
