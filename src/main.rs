use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info, warn};
use todoforge::{routes, Config, Credentials, Store};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    if config.uses_default_secret() {
        warn!("SECRET_KEY is not set; signing sessions with the built-in development secret. Set SECRET_KEY before deploying.");
    }

    let store = Store::connect(&config.database_url).await.map_err(|e| {
        error!("failed to open database: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let credentials = web::Data::new(Credentials::new(&config.secret_key));
    let store_data = web::Data::new(store.clone());
    let config_data = web::Data::new(config.clone());

    info!("Starting server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(store_data.clone())
            .app_data(credentials.clone())
            .app_data(config_data.clone())
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await?;

    store.close().await;
    info!("Server stopped");
    Ok(())
}
