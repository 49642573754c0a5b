mod campus;
mod chat;
mod config;
mod db;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");

    let seed = campus::seed::Seed::load(config.seed_path.as_deref()).expect("campus seed failed to load");
    let campus = campus::Campus::from_seed(seed);
    tracing::info!(
        books = campus.catalog.books.len(),
        equipment = campus.catalog.equipment.len(),
        open_slots = campus.catalog.equipment.iter().map(|e| e.open_slots().count()).sum::<usize>(),
        seats_taken = campus.catalog.study_rooms.iter().map(|r| r.occupied()).sum::<usize>(),
        rewards = campus.rewards.len(),
        "campus seeded"
    );

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("database init failed");

    // Chat relay is non-fatal: without a key, /api/chat answers 500 with the reason.
    let chat_client = chat::from_env();
    match &chat_client {
        Ok(client) => tracing::info!(model = chat::GenerativeModel::model(client), "chat model initialized"),
        Err(e) => tracing::warn!(error = %e, "chat model not configured; relay disabled"),
    }
    let state = state::AppState::new(pool, campus, state::ChatBackend::from_result(chat_client));

    let app = routes::app(state);
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "campus hub listening");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .expect("server failed");
}
