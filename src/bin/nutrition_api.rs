use bobafit::{
    app,
    backend::{build_backend_app, BackendState},
    config::BackendConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    app::init_tracing();

    let config = BackendConfig::from_env()?;
    let addr = config.addr()?;
    let state = BackendState::new(config)?;
    if state.mock_mode() {
        tracing::warn!("CALORIENINJAS_API_KEY is not set; every lookup returns mock data");
    }

    app::serve(build_backend_app(state), addr).await
}
