use dotenvy::dotenv;
use portfolio_content::{DeliveryClient, DeliveryConfig, ProjectResolver, QueryOptions};
use std::sync::Arc;

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

    let client = Arc::new(DeliveryClient::from_config(config));
    let resolver = ProjectResolver::new(client);

    let projects = resolver.projects(QueryOptions::default().limit(10)).await;
    println!("{} projects", projects.len());
    for project in &projects {
        println!(
            "- {} ({}) [{}]",
            project.title,
            project.slug,
            project.technologies.join(", ")
        );
    }
}
