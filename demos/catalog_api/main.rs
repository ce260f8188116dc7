//! Catalog API Example
//!
//! Serves a small product catalog. Ask for `application/hal.v1+json` to get
//! HAL documents; any other `Accept` value gets plain JSON.
//!
//! ```text
//! curl -H 'Accept: application/hal.v1+json' http://127.0.0.1:3000/products/<id>
//! curl -H 'Accept: application/hal.v1+json' 'http://127.0.0.1:3000/products?sort(name)&limit(0,2)'
//! ```

use axum::extract::{FromRef, Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hal::links::paging::requested_window;
use hal::prelude::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
struct Category {
    id: Uuid,
    name: String,
}

#[derive(Debug, Clone, Serialize)]
struct Supplier {
    name: String,
    country: String,
}

#[derive(Debug, Clone, Serialize)]
struct Product {
    id: Uuid,
    name: String,
    price: f64,
    discontinued: bool,
    category: Category,
    supplier: Supplier,
    related: Vec<Category>,
}

impl_resource!(Category { id, name });
impl_resource!(Supplier { name, country });
impl_resource!(Product {
    id,
    name,
    price,
    discontinued,
    category: resource,
    supplier: resource,
    related: resources,
});

/// Link rules of the catalog
struct CatalogModule;

impl HalModule for CatalogModule {
    fn name(&self) -> &str {
        "catalog"
    }

    fn links(&self) -> Result<LinkRegistry> {
        let mut links = LinkRegistry::new();

        links
            .add_link(
                "self",
                "get_product",
                |p: &Product| format!("/products/{}", p.id),
                |_: &Product| true,
            )
            .add_link(
                "order",
                "create_order",
                |p: &Product| format!("/orders?product={}", p.id),
                |p: &Product| !p.discontinued,
            )
            .add_link_template(
                "curies",
                "docs",
                "cat",
                "/docs/{rel}",
                |_: &Product, template: &str| template.to_string(),
                |_: &Product| true,
            )
            .add_link(
                "self",
                "get_category",
                |c: &Category| format!("/categories/{}", c.id),
                |_: &Category| true,
            )
            .add_link(
                "self",
                "list_products",
                |p: &Page<Product>| format!("/products?{}", Page::<Product>::limit_clause((p.offset, p.limit))),
                |_: &Page<Product>| true,
            )
            .add_link(
                "next",
                "list_products",
                |p: &Page<Product>| {
                    p.next_window()
                        .map(|w| format!("/products?{}", Page::<Product>::limit_clause(w)))
                        .unwrap_or_default()
                },
                |p: &Page<Product>| p.has_next(),
            )
            .add_link(
                "prev",
                "list_products",
                |p: &Page<Product>| {
                    p.previous_window()
                        .map(|w| format!("/products?{}", Page::<Product>::limit_clause(w)))
                        .unwrap_or_default()
                },
                |p: &Page<Product>| p.has_previous(),
            );

        Ok(links)
    }
}

#[derive(Clone)]
struct AppState {
    hal: Arc<HalHost>,
    products: Arc<Vec<Product>>,
}

impl FromRef<AppState> for Arc<HalHost> {
    fn from_ref(state: &AppState) -> Self {
        state.hal.clone()
    }
}

async fn get_product(
    State(state): State<AppState>,
    hal: HalContext,
    Path(id): Path<Uuid>,
) -> Response {
    match state.products.iter().find(|p| p.id == id) {
        Some(product) => hal.respond(StatusCode::OK, product),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(serde_json::json!({ "error": format!("Product {} not found", id) })),
        )
            .into_response(),
    }
}

async fn list_products(
    State(state): State<AppState>,
    hal: HalContext,
    RawQuery(query): RawQuery,
) -> Response {
    let (offset, limit) = query
        .as_deref()
        .and_then(requested_window)
        .unwrap_or((0, 10));

    let items = state
        .products
        .iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect();
    let page = Page::new(items, offset, limit).with_total(state.products.len());

    hal.respond(StatusCode::OK, &page)
}

fn seed() -> Vec<Product> {
    let tools = Category {
        id: Uuid::new_v4(),
        name: "Tools".to_string(),
    };
    let garden = Category {
        id: Uuid::new_v4(),
        name: "Garden".to_string(),
    };
    let acme = Supplier {
        name: "Acme".to_string(),
        country: "FR".to_string(),
    };

    vec![
        Product {
            id: Uuid::new_v4(),
            name: "Hammer".to_string(),
            price: 12.5,
            discontinued: false,
            category: tools.clone(),
            supplier: acme.clone(),
            related: vec![garden.clone()],
        },
        Product {
            id: Uuid::new_v4(),
            name: "Rake".to_string(),
            price: 18.0,
            discontinued: false,
            category: garden.clone(),
            supplier: acme.clone(),
            related: vec![tools.clone()],
        },
        Product {
            id: Uuid::new_v4(),
            name: "Sickle".to_string(),
            price: 9.9,
            discontinued: true,
            category: garden,
            supplier: acme,
            related: Vec::new(),
        },
    ]
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let module = CatalogModule;
    println!("🚀 Starting {} v{}", module.name(), module.version());

    let host = HalBuilder::new().register_module(module)?.build()?;

    let products = seed();
    for product in &products {
        println!("  📦 {} -> /products/{}", product.name, product.id);
    }

    let state = AppState {
        hal: Arc::new(host),
        products: Arc::new(products),
    };

    let app = axum::Router::new()
        .route("/products", axum::routing::get(list_products))
        .route("/products/{id}", axum::routing::get(get_product))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    println!("\n🌐 Server running on http://127.0.0.1:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
