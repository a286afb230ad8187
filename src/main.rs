use std::sync::Arc;

use anyhow::Context;

use contoso_travel::chat::agent::ChatAgent;
use contoso_travel::chat::conversation::ConversationLoop;
use contoso_travel::chat::render::render_turn;
use contoso_travel::core::config::{AppConfig, AppPaths};
use contoso_travel::core::logging;
use contoso_travel::llm::openai::OpenAiProvider;
use contoso_travel::llm::types::FunctionChoice;
use contoso_travel::rag::corpus::seed_corpus;
use contoso_travel::rag::retriever::Retriever;
use contoso_travel::rag::sqlite::SqliteVectorStore;
use contoso_travel::tools::destinations::DestinationGuide;
use contoso_travel::tools::temperature::TemperatureTable;
use contoso_travel::tools::ToolRegistry;

const DEMO_QUERIES: [&str; 5] = [
    "Can you explain Contoso's travel insurance coverage?",
    "What is the average temperature of the Maldives?",
    "What is a good cold destination offered by Contoso and what is its average temperature?",
    "What amenities do Contoso's premium travel services include?",
    "What is Neural Network?",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let paths = AppPaths::new();
    logging::init(&paths);

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(model = %config.chat_model, "starting travel assistant");

    let provider = Arc::new(OpenAiProvider::new(
        config.base_url.clone(),
        config.api_key.clone(),
    ));
    let store = Arc::new(
        SqliteVectorStore::with_path(paths.db_path.clone())
            .await
            .context("Failed to open vector store")?,
    );

    seed_corpus(store.as_ref(), provider.as_ref(), &config.embedding_model)
        .await
        .context("Failed to seed corpus")?;

    let retriever = Retriever::new(
        store,
        provider.clone(),
        config.embedding_model.clone(),
        config.top_k,
    );
    let registry = Arc::new(ToolRegistry::new(
        DestinationGuide::new(),
        TemperatureTable::new(),
    ));
    let agent = ChatAgent::new(
        provider,
        registry,
        config.chat_model.clone(),
        FunctionChoice::Auto,
    );

    let mut conversation = ConversationLoop::new(agent, retriever);

    for (idx, query) in DEMO_QUERIES.iter().enumerate() {
        tracing::info!(turn = idx + 1, "processing user turn");
        let report = conversation.run_turn(query).await?;
        println!("{}", render_turn(&report, idx + 1));
    }

    Ok(())
}
