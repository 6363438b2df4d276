/// Liveness greeting.
pub async fn hello() -> &'static str {
    "Hello World!"
}
