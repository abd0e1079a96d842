//! Publishes a complete demo page: a beam calculation using all three
//! engines, plus a Python summary appended as a second revision.
//!
//! Configure via environment (or a `.env` file):
//!   CALCTREE__API__API_KEY=...
//!   CALCTREE__API__WORKSPACE_ID=...
//!
//! Run with: cargo run --example create_demo_page

use calctree_client::services::{PublishPageRequest, StatementDraft};
use calctree_client::{Client, Engine, load_config, services};

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

    let request = PublishPageRequest {
        title: "Complete Engineering Calculation".to_string(),
        markdown: Some(
            "# Structural Beam Analysis\n\n\
             Moment and bending stress in a simply supported beam."
                .to_string(),
        ),
        statements: vec![
            StatementDraft::new("beam_length", Engine::Mathjs, "beam_length = 10 m"),
            StatementDraft::new("load", Engine::Mathjs, "load = 5 kN"),
            StatementDraft::new(
                "Section Properties",
                Engine::MultilineMathjs,
                "width = 300 mm\nheight = 500 mm\narea = width * height",
            ),
            StatementDraft::new("moment", Engine::Mathjs, "moment = load * beam_length"),
            StatementDraft::new(
                "stress",
                Engine::Mathjs,
                "stress = moment / (width * height^2 / 6)",
            ),
        ],
        appendices: vec![StatementDraft::new(
            "Analysis Summary",
            Engine::Python,
            r#"print(f'Bending Moment: {moment}')
print(f'Bending Stress: {stress}')

safety_factor = 250e6 / stress
print(f'Safety Factor: {safety_factor:.2f}')
"#,
        )],
        ..Default::default()
    };

    let page = services::publish_page(&client, request).await?;

    println!("Page published: {}", page.url);
    println!("Calculation id: {}", page.calculation_id);
    if let Some(revision) = page.revision_id {
        println!("Latest revision: {}", revision);
    }

    Ok(())
}
