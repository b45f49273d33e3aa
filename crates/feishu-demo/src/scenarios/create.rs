//! Build a fresh Bitable app with a typed product table and fill it.

use anyhow::Context;
use tracing::{info, warn};

use feishu_shared::fields::{
    encode_checkbox, encode_datetime_from_timestamp, encode_multi_select, encode_number,
    encode_single_select, encode_text,
};
use feishu_shared::{FieldSpec, FieldType, Fields};

use super::{timestamp_suffix, Demo};

const PRODUCT: &str = "Product";
const STOCK: &str = "Stock";
const UNIT_PRICE: &str = "Unit Price";
const STATUS: &str = "Status";
const TAGS: &str = "Tags";
const CREATED: &str = "Created";
const ON_SALE: &str = "On Sale";
const DESCRIPTION: &str = "Description";

fn schema() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new(PRODUCT, FieldType::Text),
        FieldSpec::new(STOCK, FieldType::Number),
        FieldSpec::new(UNIT_PRICE, FieldType::Number),
        FieldSpec::new(STATUS, FieldType::SingleSelect),
        FieldSpec::new(TAGS, FieldType::MultiSelect),
        FieldSpec::new(CREATED, FieldType::DateTime),
        FieldSpec::new(ON_SALE, FieldType::Checkbox),
        FieldSpec::new(DESCRIPTION, FieldType::Text),
    ]
}

struct Product {
    name: &'static str,
    stock: f64,
    price: f64,
    status: &'static str,
    tags: &'static [&'static str],
    on_sale: bool,
    description: &'static str,
}

impl Product {
    fn fields(&self) -> Fields {
        Fields::new()
            .with(PRODUCT, encode_text(self.name))
            .with(STOCK, encode_number(self.stock))
            .with(UNIT_PRICE, encode_number(self.price))
            .with(STATUS, encode_single_select(self.status))
            .with(TAGS, encode_multi_select(self.tags.iter().copied()))
            .with(CREATED, encode_datetime_from_timestamp(&chrono::Local::now()))
            .with(ON_SALE, encode_checkbox(self.on_sale))
            .with(DESCRIPTION, encode_text(self.description))
    }
}

const SAMPLE: Product = Product {
    name: "iPhone 15 Pro",
    stock: 100.0,
    price: 7999.0,
    status: "On sale",
    tags: &["Best seller", "New"],
    on_sale: true,
    description: "Latest iPhone with the A17 Pro chip",
};

const CATALOGUE: [Product; 5] = [
    Product {
        name: "MacBook Pro 16",
        stock: 50.0,
        price: 19999.0,
        status: "On sale",
        tags: &["Best seller", "Recommended"],
        on_sale: true,
        description: "Professional laptop",
    },
    Product {
        name: "iPad Air",
        stock: 120.0,
        price: 4799.0,
        status: "On sale",
        tags: &["New"],
        on_sale: true,
        description: "Thin and light tablet",
    },
    Product {
        name: "AirPods Pro 2",
        stock: 200.0,
        price: 1899.0,
        status: "On sale",
        tags: &["Best seller"],
        on_sale: true,
        description: "Noise-cancelling wireless earbuds",
    },
    Product {
        name: "Apple Watch Ultra 2",
        stock: 30.0,
        price: 6499.0,
        status: "Pre-order",
        tags: &["New", "Recommended"],
        on_sale: false,
        description: "Outdoor sports smartwatch",
    },
    Product {
        name: "Mac Studio",
        stock: 15.0,
        price: 14999.0,
        status: "On sale",
        tags: &["Pro"],
        on_sale: true,
        description: "Desktop workstation",
    },
];

pub async fn run(demo: &Demo) -> anyhow::Result<()> {
    let client = &demo.client;

    // -----------------------------------------------------------------------
    // 1. App and table
    // -----------------------------------------------------------------------
    let app_name = format!("Product catalogue_{}", timestamp_suffix());
    let (app, table) = client
        .create_app_and_table(&app_name, demo.folder_token(), "Products", &schema())
        .await
        .context("Failed to create app and table")?;
    info!(%app, %table, name = %app_name, "Created app and table");

    demo.settle(demo.config.demo.table_settle()).await;

    // -----------------------------------------------------------------------
    // 2. Records
    // -----------------------------------------------------------------------
    let record = client
        .create_record(&app, &table, &SAMPLE.fields())
        .await
        .context("Failed to create sample record")?;
    info!(%record, "Created sample record");

    let batch: Vec<Fields> = CATALOGUE.iter().map(Product::fields).collect();
    let ids = client
        .batch_create_records(&app, &table, &batch)
        .await
        .context("Failed to batch create records")?;
    info!(count = ids.len(), "Batch created records");

    let fetched = client
        .get_record(&app, &table, &record)
        .await
        .context("Failed to read sample record")?;
    for (name, value) in &fetched.fields {
        info!(field = %name, value = %value, "Sample record field");
    }

    let changes = Fields::new()
        .with(STOCK, encode_number(80.0))
        .with(STATUS, encode_single_select("Low stock"))
        .with(TAGS, encode_multi_select(["Best seller", "Limited"]));
    client
        .update_record(&app, &table, &record, &changes)
        .await
        .context("Failed to update sample record")?;
    info!(%record, "Updated sample record");

    let all = client
        .list_all_records(&app, &table, demo.config.demo.page_size)
        .await
        .context("Failed to list records")?;
    info!(count = all.len(), "Listed all records");

    // -----------------------------------------------------------------------
    // 3. Cleanup
    // -----------------------------------------------------------------------
    // The catalogue stays so the table has something to look at.
    if let Err(e) = client.delete_record(&app, &table, &record).await {
        warn!(%record, error = %e, "Failed to delete sample record");
    } else {
        info!(%record, "Deleted sample record");
    }

    println!("Table: {}", demo.table_url(&app, &table));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_wire_shape() {
        let schema = serde_json::to_value(schema()).unwrap();
        assert_eq!(schema[0], json!({"field_name": "Product", "type": 1}));
        assert_eq!(schema[3], json!({"field_name": "Status", "type": 3}));
        assert_eq!(schema[5], json!({"field_name": "Created", "type": 5}));
        assert_eq!(schema[6], json!({"field_name": "On Sale", "type": 7}));
    }

    #[test]
    fn test_sample_matches_schema() {
        let fields = SAMPLE.fields();
        for spec in schema() {
            let value = fields
                .get(&spec.field_name)
                .unwrap_or_else(|| panic!("missing {}", spec.field_name));
            assert_eq!(value.field_type(), spec.field_type, "{}", spec.field_name);
        }
    }

    #[test]
    fn test_catalogue_tags() {
        let value = serde_json::to_value(CATALOGUE[3].fields()).unwrap();
        assert_eq!(value[TAGS], json!(["New", "Recommended"]));
        assert_eq!(value[ON_SALE], json!(false));
    }
}
