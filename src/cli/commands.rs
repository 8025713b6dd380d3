use crate::analyzers::EmissionEstimator;
use crate::cli::args::{Cli, Commands};
use crate::error::{PeakError, Result};
use crate::readers::{CatalogReader, SoundingReader};
use crate::store::{ObjectStore, StoreConfig};
use crate::utils::filename::generate_default_figure_filename;
use crate::utils::progress::ProgressReporter;
use crate::utils::sounding::sounding_datetime;
use crate::writers::FigureWriter;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Estimate {
            sounding_id,
            detail_file,
            catalog,
            catalog_file,
            output,
            no_figure,
        } => {
            let id: i64 = sounding_id
                .parse()
                .map_err(|_| PeakError::InvalidSoundingId(sounding_id.clone()))?;

            // The store is only needed when a source has to be fetched
            let store = if detail_file.is_none() || (catalog.is_some() && catalog_file.is_none()) {
                Some(ObjectStore::new(StoreConfig::from_file(&cli.config)?))
            } else {
                None
            };

            let (detail_source, detail_bytes) =
                load_detail(&sounding_id, detail_file.as_deref(), store.as_ref()).await?;
            let soundings = SoundingReader::new().read_soundings(&detail_source, &detail_bytes)?;

            println!("Loaded {} soundings for peak {}", soundings.len(), sounding_id);
            if let Ok(acquired) = sounding_datetime(id) {
                println!("Acquired {}", acquired);
            }

            let (catalog_source, catalog_bytes) = load_catalog(
                catalog.as_deref(),
                catalog_file.as_deref(),
                store.as_ref(),
            )
            .await?;
            let peak_catalog =
                CatalogReader::new().read_catalog(&catalog_source, &catalog_bytes)?;

            let params = peak_catalog.params_for(id);
            if params.is_empty() {
                println!(
                    "Sounding {} not found in the peak catalog - nothing to estimate",
                    sounding_id
                );
                return Ok(());
            }

            let estimator = EmissionEstimator::new();
            let estimate = estimator.estimate(&soundings, &params)?;

            println!("\n{}", estimate.summary());

            if !no_figure {
                let writer = FigureWriter::new();
                let figure = writer.build_figure(&soundings, &params, &estimate)?;

                let figure_path = output
                    .unwrap_or_else(|| generate_default_figure_filename(&sounding_id));
                writer.write_figure(&figure, &figure_path)?;
                println!("Figure written to {}", figure_path.display());
            }
        }

        Commands::List { prefix, pattern } => {
            let store = ObjectStore::new(StoreConfig::from_file(&cli.config)?);

            let progress = ProgressReporter::new_spinner("Listing objects...", false);
            let urls = store.list_urls(&prefix, &pattern).await?;
            progress.finish_with_message(&format!("Found {} object(s)", urls.len()));

            for url in urls {
                println!("{}", url);
            }
        }

        Commands::Upload {
            input_dir,
            extension,
            prefix,
            content_type,
        } => {
            let store = ObjectStore::new(StoreConfig::from_file(&cli.config)?);

            println!(
                "Uploading {} files from {} to {}",
                extension,
                input_dir.display(),
                prefix
            );

            let progress = ProgressReporter::new_spinner("Uploading files...", false);
            let uploaded = store
                .upload_dir(&input_dir, &extension, &prefix, &content_type, Some(&progress))
                .await?;
            progress.finish_with_message(&format!("Uploaded {} file(s)", uploaded));
        }

        Commands::Delete {
            prefix,
            pattern,
            force,
        } => {
            let store = ObjectStore::new(StoreConfig::from_file(&cli.config)?);

            if !force {
                println!("Nothing will be deleted. Use --force to delete.");
            }

            let progress = ProgressReporter::new_spinner("Deleting objects...", false);
            let outcome = store
                .delete_objects(&prefix, &pattern, !force, Some(&progress))
                .await?;
            progress.finish_with_message("Delete complete");

            println!("{}", outcome.summary());
        }
    }

    Ok(())
}

async fn load_detail(
    sounding_id: &str,
    detail_file: Option<&std::path::Path>,
    store: Option<&ObjectStore>,
) -> Result<(String, Vec<u8>)> {
    if let Some(path) = detail_file {
        return Ok((path.to_string_lossy().into_owned(), std::fs::read(path)?));
    }

    let store = store.ok_or_else(|| {
        PeakError::Config("an object store configuration is required to fetch the detail dataset".to_string())
    })?;
    let url = store.detail_url(sounding_id);
    println!("Fetching {}", url);
    let bytes = store.fetch(&url).await?;
    Ok((url, bytes))
}

async fn load_catalog(
    catalog: Option<&str>,
    catalog_file: Option<&std::path::Path>,
    store: Option<&ObjectStore>,
) -> Result<(String, Vec<u8>)> {
    if let Some(path) = catalog_file {
        return Ok((path.to_string_lossy().into_owned(), std::fs::read(path)?));
    }

    let Some(reference) = catalog else {
        return Err(PeakError::Config(
            "a peak catalog is required (--catalog or --catalog-file)".to_string(),
        ));
    };

    let store = store.ok_or_else(|| {
        PeakError::Config("an object store configuration is required to fetch the peak catalog".to_string())
    })?;
    let url = if reference.starts_with("http://") || reference.starts_with("https://") {
        reference.to_string()
    } else {
        store.config().object_url(reference)
    };
    println!("Fetching {}", url);
    let bytes = store.fetch(&url).await?;
    Ok((url, bytes))
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
}
