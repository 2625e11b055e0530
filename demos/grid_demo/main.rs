//! Grid demo: page through an in-memory order list the way a grid would

use paging::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ProxyConfig {
        page_size: 3,
        ..Default::default()
    };

    let rows: Vec<Value> = (1..=10)
        .map(|i| {
            json!({
                "number": format!("ORD-{:03}", i),
                "status": if i % 3 == 0 { "paid" } else { "open" },
                "amount": (i * 37) % 200,
            })
        })
        .collect();

    let proxy = PagingMemoryProxy::<JsonReader<Value>>::from_config(&config);
    proxy.load(&Value::Array(rows));
    tracing::info!(records = proxy.len(), "Dataset loaded");

    let source: &dyn PagedSource<Value> = &proxy;

    for page in 1.. {
        let params = QueryParams {
            page: Some(page),
            filter: Some(r#"{"status": "open"}"#.to_string()),
            sort: Some("amount:desc".to_string()),
            ..Default::default()
        };

        let result = source.read(params.into_operation(&config)?).await;
        let response = PaginatedResponse {
            pagination: result
                .result_set
                .pagination(params.page(), params.limit(&config)),
            data: result.result_set.records,
        };

        println!("{}", serde_json::to_string_pretty(&response)?);

        if !response.pagination.has_next {
            break;
        }
    }

    Ok(())
}
