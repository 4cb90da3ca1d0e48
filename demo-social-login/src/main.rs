use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use social_login_axum::{AuthContext, social_login_router};

mod server;

use crate::server::{cors_layer, listen_port, serve};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{}=debug,social_login=debug,social_login_axum=debug,tower_http=info",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ctx = AuthContext::from_env().await?;

    let mut app = social_login_router(ctx);
    if let Some(cors) = cors_layer()? {
        app = app.layer(cors);
    }

    serve(listen_port(), app).await?;
    Ok(())
}
