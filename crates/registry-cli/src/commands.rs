use anyhow::{Context, Result};
use tracing::{debug, info};

use registry_cli::render::{
    data_preview, overview_header, overview_table, records_table, search_report, standard_info,
    standards_table, statistics_text,
};
use registry_loader::StandardsRegistry;
use registry_model::Standard;

use crate::cli::{SearchArgs, ShowArgs, TableArgs};

const NOT_FOUND: &str = "Standard not found.";
const NO_DATA: &str = "No data available for this standard.";

pub fn run_overview(registry: &StandardsRegistry) -> Result<()> {
    let overview = registry.overview().context("build registry overview")?;
    info!(
        standards = overview.standard_count(),
        records = overview.total_records,
        "overview built"
    );
    println!("{}", overview_header(&overview));
    if overview.entries.is_empty() {
        println!("No standards registered.");
        return Ok(());
    }
    println!("{}", overview_table(&overview));
    Ok(())
}

pub fn run_list(registry: &StandardsRegistry) -> Result<()> {
    let standards = registry.list_standards();
    if standards.is_empty() {
        println!("No standards registered.");
        return Ok(());
    }
    println!("{}", standards_table(standards));
    Ok(())
}

pub fn run_show(registry: &StandardsRegistry, args: &ShowArgs) -> Result<()> {
    let Some(standard) = lookup(registry, &args.id) else {
        return Ok(());
    };
    println!("{}", standard_info(standard));
    println!();
    let records = registry
        .get_records(&standard.id)
        .with_context(|| format!("load data for {}", standard.id))?;
    let Some(stats) = registry
        .get_statistics(&standard.id)
        .with_context(|| format!("compute statistics for {}", standard.id))?
    else {
        println!("{NO_DATA}");
        return Ok(());
    };
    println!("{}", statistics_text(&stats));
    println!();
    println!("{}", data_preview(&records));
    Ok(())
}

pub fn run_table(registry: &StandardsRegistry, args: &TableArgs) -> Result<()> {
    let Some(standard) = lookup(registry, &args.id) else {
        return Ok(());
    };
    let records = registry
        .get_records(&standard.id)
        .with_context(|| format!("load data for {}", standard.id))?;
    let max_chars = (!args.full).then_some(args.max_width);
    match records_table(&records, max_chars) {
        Some(table) => {
            println!("{}", standard.title);
            println!("{table}");
        }
        None => println!("{NO_DATA}"),
    }
    Ok(())
}

pub fn run_search(registry: &StandardsRegistry, args: &SearchArgs) -> Result<()> {
    let Some(standard) = lookup(registry, &args.id) else {
        return Ok(());
    };
    if args.query.is_empty() {
        println!("Please enter a search query.");
        return Ok(());
    }
    let results = registry
        .search_records(&standard.id, &args.query)
        .with_context(|| format!("search {}", standard.id))?;
    info!(results = results.len(), "search finished");
    if results.is_empty() {
        println!("No results found for '{}'.", args.query);
        return Ok(());
    }
    println!("{}", search_report(&args.query, &results, args.limit));
    Ok(())
}

fn lookup<'a>(registry: &'a StandardsRegistry, id: &str) -> Option<&'a Standard> {
    let standard = registry.get_standard(id);
    if standard.is_none() {
        debug!(id, "unknown standard id");
        println!("{NOT_FOUND}");
    }
    standard
}
