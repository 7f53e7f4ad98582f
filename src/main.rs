use std::sync::Arc;

use career_chat::agent::{AgentDeps, ChatAgent};
use career_chat::config::{ChatConfig, ProfileConfig, PushoverConfig, ServerConfig};
use career_chat::llm::{LlmConfig, create_provider};
use career_chat::notify::Notifier;
use career_chat::profile::ProfileLoader;
use career_chat::tools::ToolRegistry;
use career_chat::web::app_routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(e) = dotenv {
        tracing::debug!("No .env loaded ({}), using process environment", e);
    }

    let llm_config = LlmConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("  export OPENAI_API_KEY=sk-...");
        std::process::exit(1);
    });
    let server_config = ServerConfig::from_env()?;
    let chat_config = ChatConfig::from_env()?;
    let profile_config = ProfileConfig::from_env();

    eprintln!("💬 Career Chat v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", llm_config.model);
    eprintln!("   Persona: {}", profile_config.name);
    eprintln!("   Environment: {}", server_config.environment);

    // ── Profile ─────────────────────────────────────────────────────────
    let profile_loader = ProfileLoader::new(&profile_config.name, &profile_config.dir);
    let profile = profile_loader.load().await;
    eprintln!("   Profile: {}", profile_config.dir.display());

    // ── Tools ───────────────────────────────────────────────────────────
    let notifier = Notifier::from_config(PushoverConfig::from_env());
    let tools = Arc::new(ToolRegistry::new(notifier));
    eprintln!("   Tools: {} registered", tools.count());

    // ── Agent ───────────────────────────────────────────────────────────
    let agent = Arc::new(ChatAgent::new(
        AgentDeps {
            llm: create_provider(&llm_config),
            tools,
            profile,
        },
        chat_config,
    ));

    // ── HTTP ────────────────────────────────────────────────────────────
    let app = app_routes(agent, &server_config);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", server_config.port)).await?;

    eprintln!("🚀 Server running at http://0.0.0.0:{}", server_config.port);
    eprintln!("   Static files: {}", server_config.static_dir.display());
    eprintln!(
        "   Health check: http://0.0.0.0:{}/health\n",
        server_config.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Ctrl+C received, shutting down...");
        })
        .await?;

    Ok(())
}
