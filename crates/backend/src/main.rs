use anyhow::Context;
use backend::dashboards::d402_sales_drilldown::{filter, report, service};
use backend::projections::p909_superstore_sales::loader;
use backend::shared::config::{self, OutputFormat};

fn main() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Создаем директорию для логов
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file_path = log_dir.join("backend.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let config = config::load_config()?;
    let dataset_path = config::get_dataset_path(&config);

    let dataset = loader::load_from_path(&dataset_path)
        .with_context(|| format!("failed to load dataset {}", dataset_path.display()))?;

    let summary = dataset.summary(&dataset_path.display().to_string());
    tracing::info!(
        "Dataset: {} records, {} categories, {} sub-categories, {:?} .. {:?}",
        summary.record_count,
        summary.category_count,
        summary.sub_category_count,
        summary.first_order_date,
        summary.last_order_date
    );

    // The select box always shows a category; fall back to the first one
    let mut selection = config.report.selection();
    if selection.category.is_none() {
        selection.category = filter::default_selection(&dataset).category;
    }

    let snapshot = service::get_dashboard(&dataset, &selection);

    match config.report.format {
        OutputFormat::Text => print!("{}", report::render_text(&snapshot)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
    }

    Ok(())
}
