use dotenvy::dotenv;
use portfolio_assistant::{
    suggestions, ChatSession, CompletionModel, OpenAICompatModel, OpenAICompatModelOptions,
    PortfolioService,
};
use portfolio_content::{DeliveryClient, DeliveryConfig, Profile};
use std::{
    env,
    io::{self, BufRead, Write},
    sync::Arc,
};

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let Some(config) = DeliveryConfig::from_env() else {
        eprintln!("Set CONTENTFUL_SPACE_ID and CONTENTFUL_ACCESS_TOKEN to run this example.");
        return;
    };

    let source = Arc::new(DeliveryClient::from_config(config));
    let service = Arc::new(PortfolioService::new(source, Profile::default()));

    // Without an API key the session answers from the templated responder.
    let model = env::var("OPENAI_API_KEY").ok().map(|api_key| {
        Arc::new(OpenAICompatModel::new(OpenAICompatModelOptions {
            api_key,
            ..Default::default()
        })) as Arc<dyn CompletionModel>
    });
    if model.is_none() {
        println!("(no OPENAI_API_KEY; running in fallback mode)\n");
    }

    let session = ChatSession::new(service.clone(), model);
    session.refresh_welcome().await;
    for message in session.messages().await {
        println!("assistant> {}", message.text);
    }

    let data = service.portfolio_data().await;
    println!("\nTry asking:");
    for suggestion in suggestions(&data, rand::random()) {
        println!("  - {suggestion}");
    }
    println!();

    let stdin = io::stdin();
    loop {
        print!("you> ");
        let _ = io::stdout().flush();
        let Some(Ok(line)) = stdin.lock().lines().next() else {
            break;
        };
        if line.trim() == "exit" {
            break;
        }
        match session.send(&line).await {
            Ok(reply) => println!("assistant> {}", reply.text),
            Err(error) => println!("({error})"),
        }
    }
}
