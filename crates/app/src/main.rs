use watchtower_app::Dashboard;
use watchtower_runtime::RuntimeConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    watchtower_observability::init();

    let config = RuntimeConfig::from_env();
    tracing::info!(latency_ms = config.simulated_latency.as_millis() as u64, "starting watchtower");

    let dashboard = Dashboard::new(&config)?;
    dashboard.start().await?;

    let (posts, threats) = tokio::try_join!(
        dashboard.social().api().fetch_recent_social_data(),
        dashboard.threats().api().fetch_threat_analysis(),
    )?;
    tracing::info!(posts = posts.len(), threats = threats.len(), "initial data loaded");

    Ok(())
}
