pub mod api;

use crate::cli::Args;
use crate::relay::ChatRelay;
use std::error::Error;
use std::net::SocketAddr;
use log::{ info, error };

pub use api::{ build_router, AppState };

pub struct Server {
    addr: String,
    relay: ChatRelay,
    args: Args,
}

impl Server {
    pub fn new(
        addr: String,
        relay: ChatRelay,
        args: Args,
    ) -> Self {
        Self {
            addr,
            relay,
            args,
        }
    }

    fn app_state(&self) -> AppState {
        AppState {
            relay: self.relay.clone(),
            production: self.args.is_production(),
            environment: self.args.environment.clone(),
        }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.addr.parse::<SocketAddr>()
            .map_err(|e| format!("Invalid server address '{}': {}", self.addr, e))?;
        let app = build_router(self.app_state(), &self.args.static_dir);

        if self.args.enable_tls {
            let (cert_path, key_path) = match (&self.args.tls_cert_path, &self.args.tls_key_path) {
                (Some(cert), Some(key)) => (cert, key),
                (Some(_), None) | (None, Some(_)) => {
                    error!("Both --tls-cert-path and --tls-key-path must be provided to enable TLS.");
                    return Err("Missing TLS certificate or key path".into());
                }
                (None, None) => {
                    error!("--enable-tls was set but no certificate/key paths provided.");
                    return Err("TLS enabled without cert/key".into());
                }
            };
            info!(
                "TLS enabled. Loading certificate from '{}' and key from '{}'",
                cert_path,
                key_path
            );
            let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
                cert_path,
                key_path
            ).await?;

            info!("Server running on https://{}", addr);
            axum_server::bind_rustls(addr, tls_config)
                .serve(app.into_make_service())
                .await?;
        } else {
            let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
                error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
                e
            })?;
            info!("Server running on http://{}", addr);
            axum::serve(listener, app.into_make_service()).await?;
        }

        Ok(())
    }
}
