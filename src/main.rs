/// Сборка таблицы признаков из исходного датасета

use tracing_subscriber::EnvFilter;

use bankloan_features::Pipeline;

fn main() -> anyhow::Result<()> {
    // Инициализация логирования
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let report = Pipeline::default().run()?;
    tracing::info!(report = %serde_json::to_string(&report)?, "pipeline finished");

    Ok(())
}
