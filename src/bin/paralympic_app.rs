use iris_paralympics::{config::Settings, logging, paralympics};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    logging::start();

    let result = match Settings::paralympics_from_env() {
        Ok(settings) => paralympics::server::run(settings).await,
        Err(err) => Err(err),
    };
    if let Err(err) = result {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
