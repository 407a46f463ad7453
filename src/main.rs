use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use book_catalog::{configure, BookStore, Config, ImageStore, MemoryBookStore, PgBookStore, StoreKind};
use deadpool_postgres::Runtime;
use dotenv::dotenv;
use log::{error, info};
use tokio_postgres::NoTls;

fn startup_error<E: std::fmt::Display>(context: &str, err: E) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("actix_web=info,book_catalog=info"),
    )
    .init();

    let config = Config::from_env().map_err(|e| startup_error("invalid configuration", e))?;

    let store: Arc<dyn BookStore> = match config.catalog_store {
        StoreKind::Postgres => {
            let pool = config
                .pg
                .create_pool(Some(Runtime::Tokio1), NoTls)
                .map_err(|e| startup_error("could not create postgres pool", e))?;
            let store = PgBookStore::new(pool);
            store
                .migrate()
                .await
                .map_err(|e| startup_error("could not prepare catalog schema", e))?;
            Arc::new(store)
        }
        StoreKind::Memory => {
            info!("using in-memory book store; data is lost on restart");
            Arc::new(MemoryBookStore::new())
        }
    };

    let images = ImageStore::new(&config.upload_dir);
    images
        .ensure_dir()
        .await
        .map_err(|e| startup_error("could not create upload directory", e))?;

    let store = web::Data::from(store);
    let images = web::Data::new(images);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(images.clone())
            .wrap(Cors::permissive())
            .configure(configure)
            .service(images.static_files())
            // enable logger - always register actix-web Logger middleware last
            .wrap(middleware::Logger::default())
    })
    .bind(config.server_addr.clone())?
    .run();
    info!("Server running at http://{}/", config.server_addr);

    server.await
}
