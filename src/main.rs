use bobafit::{app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    app::init_tracing();

    let state = AppState::init()?;
    let addr = state.config.addr()?;

    app::serve(app::build_app(state), addr).await
}
