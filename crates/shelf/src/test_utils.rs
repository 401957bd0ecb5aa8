use crate::api::ShelfApi;
use crate::model::Product;
use crate::store::mem_backend::MemBackend;
use crate::store::LoadReport;
use chrono::NaiveDate;

pub const FIXTURE_KEY: &str = "products";

/// A valid product with a fresh id, named `name`.
pub fn sample_product(name: &str) -> Product {
    Product::new(
        name,
        100.0,
        "supplier@example.com",
        NaiveDate::from_ymd_opt(2024, 1, 15).expect("valid fixture date"),
    )
}

pub struct ApiFixture {
    pub api: ShelfApi<MemBackend>,
    pub report: LoadReport,
}

impl Default for ApiFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiFixture {
    pub fn new() -> Self {
        Self::from_backend(MemBackend::new())
    }

    /// Open against storage already holding `raw` under [`FIXTURE_KEY`].
    pub fn with_stored(raw: &str) -> Self {
        Self::from_backend(MemBackend::with_item(FIXTURE_KEY, raw))
    }

    pub fn with_products(names: &[&str]) -> Self {
        let products: Vec<Product> = names.iter().map(|name| sample_product(name)).collect();
        let raw = serde_json::to_string(&products).expect("fixture products serialize");
        Self::with_stored(&raw)
    }

    fn from_backend(backend: MemBackend) -> Self {
        let (api, report) = ShelfApi::open(backend, FIXTURE_KEY);
        Self { api, report }
    }
}
