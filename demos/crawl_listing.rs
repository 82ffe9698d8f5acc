//! Crawl a directory listing and print what it holds.
//!
//! ```text
//! cargo run --example crawl_listing -- <root> [list|count|size|download] [proxy]
//! ```
//!
//! Without a proxy argument any HTTP listing is accepted; with one, the root
//! must be an onion service reachable through it.

use color_eyre::{eyre::eyre, Result};
use comfy_table::Table;
use console::style;
use spelunk::harvest::{Harvester, DEFAULT_LIST_LIMIT};
use spelunk::policy::PolicyBuilder;
use spelunk::progress::StyleOptions;
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let root = args
        .next()
        .ok_or_else(|| eyre!("usage: crawl_listing <root> [list|count|size|download] [proxy]"))?;
    let mode = args.next().unwrap_or_else(|| "list".to_string());
    let proxy = args.next();

    let mut builder = PolicyBuilder::new().allowed_extensions_csv("pdf,zip,txt,png,jpg");
    builder = match proxy {
        Some(proxy) => builder.proxy(proxy),
        None => builder.onion_only(false),
    };
    let harvester = Harvester::new(builder.build()?)?;

    // Ctrl-C stops the crawl and removes any partial download.
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });

    match mode.as_str() {
        "list" => {
            let report = harvester.list(&root, DEFAULT_LIST_LIMIT, &cancel).await?;
            let mut table = Table::new();
            table.set_header(vec!["Name", "Directory", "URL"]);
            for leaf in report.leaves() {
                table.add_row(vec![
                    leaf.name().to_string(),
                    leaf.segments().join("/"),
                    leaf.url().to_string(),
                ]);
            }
            println!("{table}");
            println!(
                "{} allowed of {} found",
                style(report.allowed()).bold(),
                report.total()
            );
            if report.remaining() > 0 {
                println!("{}", style(format!("...and {} more", report.remaining())).dim());
            }
        }
        "count" => {
            let report = harvester.count(&root, None, &cancel).await?;
            let mut table = Table::new();
            table.set_header(vec!["Extension", "Files"]);
            for (ext, n) in report.by_extension() {
                table.add_row(vec![format!(".{}", ext), n.to_string()]);
            }
            println!("{table}");
            println!("{}", style(format!("Found {} file(s)", report.matching())).bold());
        }
        "size" => {
            let report = harvester.size(&root, &cancel).await?;
            println!("{}", report);
        }
        "download" => {
            let harvester = harvester
                .style_options(StyleOptions::default())
                .on_complete(|summary| {
                    let line = summary.message();
                    let line = if summary.outcome().is_downloaded() {
                        style(line).green()
                    } else if summary.outcome().is_skipped() {
                        style(line).yellow()
                    } else {
                        style(line).red()
                    };
                    eprintln!("  {}", line);
                });
            let report = harvester
                .download(&root, Path::new("downloads"), &cancel)
                .await?;
            println!(
                "{}",
                style(format!(
                    "Allowed files: {}/{} | Downloaded: {} | Skipped: {} | Failed: {}",
                    report.allowed(),
                    report.total(),
                    report.downloaded(),
                    report.skipped(),
                    report.failed()
                ))
                .bold()
            );
            println!("Saved to: {}", report.destination().display());
        }
        other => return Err(eyre!("unknown mode {:?}", other)),
    }

    Ok(())
}
