pub async fn root() -> &'static str {
    "Hello World!"
}
