use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use pacientes_api::api::server;
use pacientes_api::api::types::ApiContext;
use pacientes_api::{config, db};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} v{}", config::APP_NAME, config::APP_VERSION);

    let db_path = config::db_path();
    let uploads_dir = config::uploads_dir();

    if let Err(e) = std::fs::create_dir_all(&uploads_dir) {
        tracing::error!("No se pudo crear el directorio de subidas: {e}");
        std::process::exit(1);
    }

    // The first open runs migrations; a broken store stops startup.
    match db::open_database(&db_path) {
        Ok(_) => tracing::info!(
            path = %db_path.display(),
            "Conexión exitosa con la base de datos"
        ),
        Err(e) => {
            tracing::error!("Error al conectar con la base de datos: {e}");
            std::process::exit(1);
        }
    }

    let ctx = ApiContext::new(db_path, uploads_dir);
    let addr = SocketAddr::from(([0, 0, 0, 0], config::port()));

    if let Err(e) = server::serve(ctx, addr).await {
        tracing::error!("Error del servidor: {e}");
        std::process::exit(1);
    }
}
