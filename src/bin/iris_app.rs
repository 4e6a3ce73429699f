use iris_paralympics::{config::IrisSettings, iris, logging};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    logging::start();

    let result = match IrisSettings::from_env() {
        Ok(settings) => iris::server::run(settings).await,
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
