//! Inspects an existing page: record, content, statements, and revision
//! history. Pass the page id as the first argument; without one, lists the
//! workspace's pages instead.
//!
//! Run with: cargo run --example inspect_page [PAGE_ID]

use calctree_client::models::Revision;
use calctree_client::ops::{calculations, pages, schema};
use calctree_client::{Client, load_config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = load_config()?;
    let client = Client::new(&config)?;

    let Some(page_id) = std::env::args().nth(1) else {
        println!("Pages in workspace {}:", client.workspace_id());
        for page in pages::list_pages(&client).await? {
            let marker = if page.is_deleted() { " (deleted)" } else { "" };
            println!("  {}  {}{}", page.id, page.title, marker);
        }
        return Ok(());
    };

    match pages::get_page(&client, &page_id).await? {
        Some(page) => println!("Page: {} ({})", page.title, page.id),
        None => {
            println!("No page with id {} (not created, or never attached to the tree)", page_id);
            return Ok(());
        }
    }

    if let Some(content) = pages::get_page_content(&client, &page_id).await? {
        if let Some(markdown) = content.markdown {
            println!("\nMarkdown:\n{}", markdown);
        }
        for calc in &content.calculations {
            println!("Calculation: {} @ {:?}", calc.id, calc.revision_id);
        }
    }

    // Calculation ids conventionally equal their page's id.
    if let Some(calculation) =
        calculations::get_calculation(&client, &page_id, &Revision::Latest).await?
    {
        println!("\nStatements at revision {:?}:", calculation.revision_id);
        for statement in &calculation.statements {
            println!("  [{}] {} = {}", statement.engine, statement.title, statement.formula);
        }
    }

    let history = calculations::calculation_history(&client, &page_id, 10).await?;
    if !history.is_empty() {
        println!("\nRevisions:");
        for node in history {
            println!("  {}  statements={:?}", node.revision_id, node.statement_count);
        }
    }

    if let Some(description) = schema::type_fields(&client, "Calculation").await? {
        println!("\nCalculation type fields:");
        for field in description.fields {
            println!("  {}: {:?}", field.name, field.type_ref.named());
        }
    }

    Ok(())
}
