use clap::Parser;
use object_viewer::core::{ConfigProvider, MetadataSource};
use object_viewer::domain::model::{FieldRecord, FIELD_COLUMNS};
use object_viewer::utils::error::ErrorSeverity;
use object_viewer::utils::{logger, validation::Validate};
use object_viewer::{
    CliConfig, CsvExporter, FileMetadataSource, HttpMetadataSource, LocalStorage, ObjectViewer,
    SelectOutcome, SourceSettings, TracingNotifier, ViewerError, ViewerSettings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting object-viewer");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let settings = match cli.resolve_settings().and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    }) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let result = match &settings.source {
        SourceSettings::Http(options) => match HttpMetadataSource::new(options.clone()) {
            Ok(source) => run(source, &cli, &settings).await,
            Err(e) => Err(e.into()),
        },
        SourceSettings::File { path } => {
            let source = FileMetadataSource::new(LocalStorage::new(".".to_string()), path.clone());
            run(source, &cli, &settings).await
        }
    };

    if let Err(e) = result {
        let exit_code = match e.downcast_ref::<ViewerError>() {
            Some(viewer_error) => {
                tracing::error!(
                    "❌ {} (Category: {:?}, Severity: {:?})",
                    viewer_error,
                    viewer_error.category(),
                    viewer_error.severity()
                );
                eprintln!("❌ {}", viewer_error.user_friendly_message());
                eprintln!("💡 {}", viewer_error.recovery_suggestion());
                match viewer_error.severity() {
                    ErrorSeverity::Low => 0,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 1,
                    ErrorSeverity::Critical => 3,
                }
            }
            None => {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {:#}", e);
                1
            }
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<M: MetadataSource>(
    source: M,
    cli: &CliConfig,
    settings: &ViewerSettings,
) -> anyhow::Result<()> {
    let mut viewer =
        ObjectViewer::new(source, TracingNotifier).with_labels(settings.notification_labels());
    viewer.attach().await?;

    let Some(object) = cli.object.as_deref() else {
        for option in &viewer.state().options {
            println!("{}\t{}", option.label, option.value);
        }
        return Ok(());
    };

    if let SelectOutcome::Failed = viewer.select_object(object).await? {
        let reason = viewer.state().error.clone().unwrap_or_default();
        anyhow::bail!("Failed to load fields for {}: {}", object, reason);
    }

    if !cli.name_filter.is_empty() {
        viewer.set_name_filter(&cli.name_filter);
    }
    if !cli.datatype_filter.is_empty() {
        viewer.set_datatype_filter(&cli.datatype_filter);
    }

    print_table(&viewer.state().rows);

    if cli.export || cli.print_data_uri {
        let download = viewer.export_csv(&CsvExporter::new(settings.quote_style()))?;

        if cli.export {
            let storage = LocalStorage::new(settings.output_path().to_string());
            let file_name = download.save(&storage).await?;
            let output_path = std::path::Path::new(settings.output_path()).join(file_name);
            tracing::info!("📁 Output saved to: {}", output_path.display());
            println!("📁 Output saved to: {}", output_path.display());
        }

        if cli.print_data_uri {
            println!("{}", download.data_uri());
        }
    }

    Ok(())
}

fn print_table(rows: &[FieldRecord]) {
    let cells: Vec<Vec<String>> = rows.iter().map(FieldRecord::table_cells).collect();

    let mut widths = FIELD_COLUMNS.map(|column| column.label.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = FIELD_COLUMNS
        .iter()
        .zip(widths)
        .map(|(column, width)| format!("{:<width$}", column.label, width = width))
        .collect();
    println!("{}", header.join("  ").trim_end());

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        println!("{}", line.join("  ").trim_end());
    }
}
