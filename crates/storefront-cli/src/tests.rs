use std::time::Duration;

use serde_json::{json, Value};
use storefront_spree::{
    CompoundDocument, ImageStrategy, NormalizeOptions, ProductAttributes, SpreeClient,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

#[test]
fn parses_site_info_command() {
    let cli =
        Cli::try_parse_from(["storefront-cli", "site-info"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::SiteInfo { preview: false }));
}

#[test]
fn parses_site_info_preview_flag() {
    let cli = Cli::try_parse_from(["storefront-cli", "site-info", "--preview"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::SiteInfo { preview: true }));
}

#[test]
fn products_defaults_to_first_page() {
    let cli =
        Cli::try_parse_from(["storefront-cli", "products"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Products {
            page: 1,
            per_page: 25
        }
    ));
}

#[test]
fn products_accepts_paging_flags() {
    let cli = Cli::try_parse_from([
        "storefront-cli",
        "products",
        "--page",
        "3",
        "--per-page",
        "50",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Products {
            page: 3,
            per_page: 50
        }
    ));
}

#[test]
fn products_rejects_page_zero() {
    let result = Cli::try_parse_from(["storefront-cli", "products", "--page", "0"]);
    assert!(result.is_err());
}

#[test]
fn products_rejects_oversized_page() {
    let result = Cli::try_parse_from(["storefront-cli", "products", "--per-page", "500"]);
    assert!(result.is_err());
}

#[test]
fn product_collects_every_slug() {
    let cli = Cli::try_parse_from(["storefront-cli", "product", "spree-tote", "spree-mug"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Product { ref slugs } if slugs == &["spree-tote", "spree-mug"]
    ));
}

#[test]
fn product_requires_a_slug() {
    let result = Cli::try_parse_from(["storefront-cli", "product"]);
    assert!(result.is_err());
}

#[test]
fn missing_command_is_an_error() {
    assert!(Cli::try_parse_from(["storefront-cli"]).is_err());
}

// ---------------------------------------------------------------------------
// product loading
// ---------------------------------------------------------------------------

/// A product resource; `primary: None` omits the primary variant so the
/// product fails to normalize.
fn product_json(id: &str, primary: Option<&str>) -> Value {
    let mut relationships = json!({ "variants": { "data": [] } });
    if let Some(primary) = primary {
        relationships["primary_variant"] = json!({ "data": { "type": "variant", "id": primary } });
    }
    json!({
        "id": id,
        "type": "product",
        "attributes": {
            "name": format!("Product {id}"),
            "slug": format!("product-{id}"),
            "price": "5.00",
            "currency": "USD"
        },
        "relationships": relationships
    })
}

fn master_variant_json(id: &str, sku: &str) -> Value {
    json!({
        "id": id,
        "type": "variant",
        "attributes": { "sku": sku, "price": "5.00", "currency": "USD", "is_master": true }
    })
}

/// Single-product document whose product normalizes cleanly.
fn product_document(id: &str) -> Value {
    let master_id = format!("m{id}");
    json!({
        "data": product_json(id, Some(&master_id)),
        "included": [master_variant_json(&master_id, &format!("SKU-{id}"))]
    })
}

fn test_options() -> NormalizeOptions {
    NormalizeOptions {
        show_single_variant_options: false,
        image_strategy: ImageStrategy::Unfiltered,
        placeholder_image_url: None,
        image_host: "https://cdn.example.com".to_owned(),
    }
}

fn slugs(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_owned()).collect()
}

async fn mount_product(server: &MockServer, slug: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/storefront/products/{slug}")))
        .respond_with(response)
        .mount(server)
        .await;
}

#[test]
fn lenient_normalization_skips_broken_products() {
    let document: CompoundDocument<ProductAttributes> = serde_json::from_value(json!({
        "data": [product_json("1", Some("m1")), product_json("2", None)],
        "included": [master_variant_json("m1", "P1")]
    }))
    .expect("fixture document should parse");

    let products = fetch::normalize_lenient(&document, &test_options());

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, "1");
    assert_eq!(products[0].sku, "P1");
}

#[tokio::test]
async fn products_by_slug_keep_argument_order() {
    let server = MockServer::start().await;
    // The first slug answers last, so completion order differs from argument order.
    mount_product(
        &server,
        "first",
        ResponseTemplate::new(200)
            .set_body_json(product_document("1"))
            .set_delay(Duration::from_millis(200)),
    )
    .await;
    mount_product(
        &server,
        "second",
        ResponseTemplate::new(200).set_body_json(product_document("2")),
    )
    .await;

    let client = SpreeClient::new(&server.uri(), 5, "storefront-test/0.1")
        .expect("failed to build test SpreeClient");
    let products =
        fetch::load_products_by_slug(&client, &test_options(), &slugs(&["first", "second"]), 2)
            .await
            .expect("both products should load");

    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["1", "2"]);
}

#[tokio::test]
async fn products_by_slug_skip_partial_failures() {
    let server = MockServer::start().await;
    mount_product(&server, "missing", ResponseTemplate::new(404)).await;
    mount_product(
        &server,
        "tote",
        ResponseTemplate::new(200).set_body_json(product_document("7")),
    )
    .await;

    let client = SpreeClient::new(&server.uri(), 5, "storefront-test/0.1")
        .expect("failed to build test SpreeClient");
    let products =
        fetch::load_products_by_slug(&client, &test_options(), &slugs(&["missing", "tote"]), 2)
            .await
            .expect("one product should load");

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, "7");
}

#[tokio::test]
async fn products_by_slug_fail_when_nothing_loads() {
    let server = MockServer::start().await;
    mount_product(&server, "missing", ResponseTemplate::new(404)).await;
    // Fetched fine but has no primary variant, so nothing normalizes.
    mount_product(
        &server,
        "broken",
        ResponseTemplate::new(200).set_body_json(json!({ "data": product_json("9", None) })),
    )
    .await;

    let client = SpreeClient::new(&server.uri(), 5, "storefront-test/0.1")
        .expect("failed to build test SpreeClient");
    let result =
        fetch::load_products_by_slug(&client, &test_options(), &slugs(&["missing", "broken"]), 2)
            .await;

    assert!(result.is_err(), "expected an error, got: {result:?}");
}
