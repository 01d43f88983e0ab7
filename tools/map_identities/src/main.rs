//! Scrapes the timetabling service's category pages and writes the
//! course-code -> identity map consumed by the main service. Run with
//! --apply to overwrite resources/course_identities.json; dry run prints
//! the map instead.

use std::collections::BTreeMap;
use std::env;

use dotenvy::dotenv;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

const DEFAULT_BASE_URL: &str = "https://opentimetable.dcu.ie";
const DEFAULT_CATEGORY_TYPE: &str = "241e4d36-60e0-49f8-b27e-99416745d98d";
const DEFAULT_FILTER_IDENTITY: &str = "6359fd0c-1bbe-496a-8998-4fefc5cd18de";

fn is_dry_run() -> bool {
    !std::env::args().any(|a| a == "--apply")
}

#[derive(Debug, Deserialize)]
struct FilterResponse {
    #[serde(rename = "Results")]
    results: Vec<Category>,
    #[serde(rename = "TotalPages")]
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct Category {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Identity")]
    identity: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let base_url = env::var("TIMETABLE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let authorization =
        env::var("TIMETABLE_AUTHORIZATION").unwrap_or_else(|_| "basic T64Mdy7m[".to_string());
    let category_type =
        env::var("TIMETABLE_CATEGORY_TYPE").unwrap_or_else(|_| DEFAULT_CATEGORY_TYPE.to_string());

    let client = Client::new();

    let first = fetch_page(&client, &base_url, &authorization, &category_type, 1).await?;
    println!("Found {} total pages", first.total_pages);

    let mut categories = first.results;
    for page in 2..=first.total_pages {
        let response = fetch_page(&client, &base_url, &authorization, &category_type, page).await?;
        println!("Retrieved page {} / {}", page, first.total_pages);
        categories.extend(response.results);
    }

    let map: BTreeMap<String, String> = categories
        .into_iter()
        .map(|c| (c.name.to_uppercase(), c.identity))
        .collect();
    let rendered = serde_json::to_string_pretty(&map)?;

    if is_dry_run() {
        println!("[DRY RUN] Would write {} identities:", map.len());
        println!("{}", rendered);
    } else {
        std::fs::write("resources/course_identities.json", rendered)?;
        println!("Wrote {} identities to resources/course_identities.json", map.len());
    }

    Ok(())
}

async fn fetch_page(
    client: &Client,
    base_url: &str,
    authorization: &str,
    category_type: &str,
    page: u32,
) -> Result<FilterResponse, Box<dyn std::error::Error>> {
    let url = format!(
        "{}/broker/api/CategoryTypes/{}/Categories/Filter?pageNumber={}",
        base_url, category_type, page
    );

    let body = json!({
        "Identity": DEFAULT_FILTER_IDENTITY,
        "Values": ["null"],
    });

    let response = client
        .post(&url)
        .header("Authorization", authorization)
        .header("Referer", format!("{}/", base_url))
        .header("Origin", format!("{}/", base_url))
        .json(&body)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(format!("page {} returned {}", page, response.status()).into());
    }

    Ok(response.json().await?)
}
