use super::common::{LogLevel, ProviderArgs, init_logging};
use crate::Result;
use crate::server::{AppState, router};
use clap::Parser;
use core::net::SocketAddr;
use ohno::IntoAppError;
use std::sync::Arc;

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, value_name = "ADDR", default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    #[command(flatten)]
    pub provider: ProviderArgs,
}

pub async fn serve(args: &ServeArgs) -> Result<()> {
    init_logging(args.log_level);

    let provider = args.provider.build_provider()?;
    let state = AppState {
        resolver: Arc::new(provider),
    };

    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .into_app_err_with(|| format!("unable to bind `{}`", args.listen))?;
    log::info!("listening on {}", args.listen);

    axum::serve(listener, router(state)).await.into_app_err("serving HTTP")
}
