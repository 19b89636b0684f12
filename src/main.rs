use anyhow::{Context, Result};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, fmt};

use crate::{
    config::Settings,
    extractor::Extractor,
    fetcher::HttpFetcher,
    models::QueryParameters,
    pagination::StopReason,
    prompt::display_name,
    report::WriteOutcome,
};

// Declare modules
mod config;
mod error;
mod extractor;
mod fetcher;
mod models;
mod pagination;
mod prompt;
mod report;

const RULE: &str = "============================================================";

fn print_banner(query: &QueryParameters) {
    println!("\n{RULE}");
    println!("Iniciando scraping...");
    println!("Estado: {}", query.region_code.to_uppercase());
    println!("Cidade: {}", display_name(&query.city_slug));
    if let Some(neighborhood) = &query.neighborhood_slug {
        println!("Bairro: {}", display_name(neighborhood));
    }
    println!("Páginas: 1 até {}", query.max_pages);
    println!("{RULE}\n");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "imoveis_scraper=info".into())) // Default to info if RUST_LOG not set
        .with(fmt::layer())
        .init();

    // Load configuration
    let settings = match Settings::new() {
        Ok(s) => {
            tracing::debug!(?s, "Configuration loaded successfully.");
            s
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    println!("\n{RULE}");
    println!("SCRAPER DE IMÓVEIS - INFOIMOVEIS.COM.BR");
    println!("{RULE}\n");

    let query = {
        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        prompt::read_query(&mut input, &mut output).context("Failed to read search parameters")?
    };
    print_banner(&query);

    let fetcher = HttpFetcher::new(&settings)?;
    let extractor = Extractor::new().context("Failed to compile listing selectors")?;

    let collection = pagination::collect(&fetcher, &extractor, &query, settings.request_delay())
        .await
        .context("Scraping run aborted")?;

    println!("\n{RULE}");
    match collection.stop_reason {
        StopReason::NoListings { page } => println!("Página {page} sem resultados, coleta encerrada."),
        StopReason::PageLimit { page } => println!("Limite de {page} páginas atingido."),
    }
    println!("Páginas coletadas: {}", collection.pages_fetched);
    println!("Total: {} imóveis", collection.records.len());
    println!("{RULE}\n");

    let path = settings.output_dir.join(report::report_file_name(&query));
    match report::write_report(&collection.records, &path).context("Failed to write report")? {
        WriteOutcome::Written { path, rows } => println!("Dados salvos em: {} ({rows} linhas)", path.display()),
        WriteOutcome::NoData => println!("Nenhum imóvel encontrado."),
    }

    Ok(())
}
