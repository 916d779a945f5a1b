#[tokio::main]
async fn main() {
    #[cfg(feature = "generate")]
    {
        let data_dir = server::config::Config::load().data_dir;
        process::generate(&data_dir).expect("Cache generation failed!");
    }

    server::start_server().await;
}
