//! Run both scenarios against the public API and print the results
//!
//! Usage: cargo run --example run_scenarios [-- <user-id>]
//!
//! `API_BASE_URL` overrides the API location, `RUST_LOG` the log filter.

use api_join::{Config, ScenarioExecutionResult, ScenarioRunner, UserId};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let user_id: UserId = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "1".to_string())
        .parse()?;

    let mut config = Config::default();
    if let Ok(base_url) = std::env::var("API_BASE_URL") {
        config.api.base_url = base_url;
    }

    let runner = ScenarioRunner::new(&config)?;

    println!("═══════════════════════════════════════════════════════════");
    println!("  api-join scenarios");
    println!("═══════════════════════════════════════════════════════════");
    println!("  API: {}", config.api.base_url);
    println!("  Focused user: {}", user_id);
    println!("═══════════════════════════════════════════════════════════");

    let full = runner.run_full_scenario().await;
    print_result("Full scenario", &full);

    let focused = runner.run_focused_scenario(user_id).await;
    print_result("Focused scenario", &focused);

    println!();
    println!("{}", runner.telemetry().format_summary());

    Ok(())
}

fn print_result(title: &str, result: &ScenarioExecutionResult) {
    println!();
    println!("── {} ──", title);
    println!(
        "  Status: {}",
        if result.success { "success" } else { "failed" }
    );
    println!("  Execution time: {}ms", result.execution_time_ms);
    println!("  API calls: {}", result.api_calls_count);
    println!(
        "  Processed: {} users, {} posts, {} comments",
        result.processed_users_count,
        result.processed_posts_count,
        result.processed_comments_count
    );

    if let Some(error) = &result.error {
        println!("  Error: {}", error);
    }

    let Some(data) = &result.data else {
        return;
    };
    for entry in data.iter().take(5) {
        println!(
            "  {} (@{}, {}) - {} posts, {} comments, {:.2} per post",
            entry.user.name,
            entry.user.username,
            entry.user.company,
            entry.total_posts,
            entry.total_comments,
            entry.average_comments_per_post
        );
        if let Some(post) = entry.posts.first() {
            println!("      \"{}\" ({} comments)", post.title_preview, post.comments_count);
        }
    }
    if data.len() > 5 {
        println!("  ... and {} more users", data.len() - 5);
    }
}
