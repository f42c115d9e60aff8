use std::path::Path;

use serde::Serialize;
use steamcard_core::card::AppId;
use steamcard_core::card::fragment::{NO_PRICE, review_text, store_page_url};
use steamcard_core::lookup::{GameDetails, GameLookup, ReviewSummary};

use super::{fail, load_config, steam_resolver};
use crate::{LookupArgs, OutputFormat};

#[derive(Debug, Serialize)]
struct LookupOutput {
    app_id: u32,
    store_page: String,
    details: GameDetails,
    reviews: Option<ReviewSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reviews_error: Option<String>,
}

pub async fn run(config: Option<&Path>, profile: Option<&str>, args: LookupArgs) {
    let rc = load_config("lookup", config, profile);

    let app_id: AppId = match args.app_id.trim().parse() {
        Ok(id) => id,
        Err(e) => fail("lookup", e),
    };

    let resolver = steam_resolver("lookup", &rc);
    let client = resolver.lookup();

    let (details, reviews) = tokio::join!(client.details(app_id), client.reviews(app_id));
    let details = match details {
        Ok(d) => d,
        Err(e) => fail("lookup", format!("{app_id}: {e}")),
    };
    let (reviews, reviews_error) = match reviews {
        Ok(r) => (Some(r), None),
        Err(e) => (None, Some(e.to_string())),
    };

    let out = LookupOutput {
        app_id: app_id.get(),
        store_page: store_page_url(app_id),
        details,
        reviews,
        reviews_error,
    };

    match args.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&out) {
            Ok(s) => println!("{s}"),
            Err(e) => fail("lookup", e),
        },
        OutputFormat::Text => print_text(&out),
    }
}

fn print_text(out: &LookupOutput) {
    println!("name: {}", out.details.name);
    println!("price: {}", out.details.price.as_deref().unwrap_or(NO_PRICE));
    match (&out.reviews, &out.reviews_error) {
        (Some(r), _) => println!("reviews: {}", review_text(r)),
        (None, Some(e)) => println!("reviews: unavailable ({e})"),
        (None, None) => println!("reviews: unavailable"),
    }
    if let Some(ref img) = out.details.header_image {
        println!("cover: {img}");
    }
    println!("store: {}", out.store_page);
}
