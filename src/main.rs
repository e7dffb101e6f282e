#[tokio::main]
async fn main() {
    buildable_api::start_server().await;
}
