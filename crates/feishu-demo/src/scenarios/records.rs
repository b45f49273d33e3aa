//! Record CRUD against an existing table.
//!
//! The configured table must have these columns:
//! `Name` (text), `Quantity` (number), `Price` (number),
//! `Description` (text), `Created` (date) and `On Sale` (checkbox).

use anyhow::Context;
use tracing::{info, warn};

use feishu_client::RecordUpdate;
use feishu_shared::fields::{
    encode_checkbox, encode_datetime_from_timestamp, encode_number, encode_text,
};
use feishu_shared::{AppToken, Fields, RecordId, TableId};

use super::Demo;

const NAME: &str = "Name";
const QUANTITY: &str = "Quantity";
const PRICE: &str = "Price";
const DESCRIPTION: &str = "Description";
const CREATED: &str = "Created";
const ON_SALE: &str = "On Sale";

fn product(name: &str, quantity: f64, price: f64, description: &str, on_sale: bool) -> Fields {
    Fields::new()
        .with(NAME, encode_text(name))
        .with(QUANTITY, encode_number(quantity))
        .with(PRICE, encode_number(price))
        .with(DESCRIPTION, encode_text(description))
        .with(CREATED, encode_datetime_from_timestamp(&chrono::Local::now()))
        .with(ON_SALE, encode_checkbox(on_sale))
}

fn batch_products() -> Vec<Fields> {
    vec![
        product("Batch product A", 50.0, 199.99, "Batch-created product A", true),
        product("Batch product B", 75.0, 249.99, "Batch-created product B", false),
        product("Batch product C", 120.0, 349.99, "Batch-created product C", true),
    ]
}

/// Restock every batch record: quantity 100, 110, 120, ...
fn restock(ids: &[RecordId]) -> Vec<RecordUpdate> {
    ids.iter()
        .enumerate()
        .map(|(i, id)| {
            let fields = Fields::new()
                .with(QUANTITY, encode_number(100.0 + 10.0 * i as f64))
                .with(DESCRIPTION, encode_text(format!("Batch update #{}", i + 1)));
            RecordUpdate::new(id.clone(), fields)
        })
        .collect()
}

pub async fn run(demo: &Demo) -> anyhow::Result<()> {
    let (app, table) = demo.config.target_table()?;
    let client = &demo.client;

    // -----------------------------------------------------------------------
    // 1. Single record round trip
    // -----------------------------------------------------------------------
    let fields = product(
        "Test product",
        100.0,
        299.99,
        "A product created to exercise record creation",
        true,
    );
    let record = client
        .create_record(&app, &table, &fields)
        .await
        .context("Failed to create record")?;
    info!(%record, "Created record");

    demo.settle(demo.config.demo.record_settle()).await;

    let fetched = client
        .get_record(&app, &table, &record)
        .await
        .context("Failed to read record")?;
    info!(%record, fields = %serde_json::Value::Object(fetched.fields), "Read record");

    let changes = Fields::new()
        .with(QUANTITY, encode_number(200.0))
        .with(PRICE, encode_number(399.99))
        .with(DESCRIPTION, encode_text("Updated product description"))
        .with(ON_SALE, encode_checkbox(false));
    client
        .update_record(&app, &table, &record, &changes)
        .await
        .context("Failed to update record")?;
    info!(%record, "Updated record");

    // -----------------------------------------------------------------------
    // 2. Listing
    // -----------------------------------------------------------------------
    let page = client
        .list_records(&app, &table, demo.config.demo.page_size, None)
        .await
        .context("Failed to list records")?;
    info!(
        count = page.items.len(),
        has_more = page.has_more,
        next_page = page.page_token.as_deref().unwrap_or(""),
        "Listed records"
    );

    // -----------------------------------------------------------------------
    // 3. Batch create and update
    // -----------------------------------------------------------------------
    let batch = client
        .batch_create_records(&app, &table, &batch_products())
        .await
        .context("Failed to batch create records")?;
    info!(count = batch.len(), "Batch created records");

    if !batch.is_empty() {
        client
            .batch_update_records(&app, &table, &restock(&batch))
            .await
            .context("Failed to batch update records")?;
        info!(count = batch.len(), "Batch updated records");
    }

    // -----------------------------------------------------------------------
    // 4. Cleanup
    // -----------------------------------------------------------------------
    client
        .delete_record(&app, &table, &record)
        .await
        .context("Failed to delete record")?;
    info!(%record, "Deleted record");

    delete_quietly(demo, &app, &table, &batch).await;
    info!("Record scenario finished");
    Ok(())
}

/// Delete `ids`, logging failures instead of aborting.
async fn delete_quietly(demo: &Demo, app: &AppToken, table: &TableId, ids: &[RecordId]) {
    for id in ids {
        if let Err(e) = demo.client.delete_record(app, table, id).await {
            warn!(record = %id, error = %e, "Failed to delete record");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feishu_shared::FieldValue;
    use serde_json::json;

    #[test]
    fn test_product_has_every_column() {
        let fields = product("x", 1.0, 2.5, "d", true);
        let names: Vec<&str> = fields.iter().map(|(name, _)| name).collect();
        assert_eq!(names, [NAME, QUANTITY, PRICE, DESCRIPTION, CREATED, ON_SALE]);
        assert!(matches!(fields.get(CREATED), Some(FieldValue::DateTimeMillis(_))));
    }

    #[test]
    fn test_restock_quantities() {
        let ids = [RecordId::from("rec1"), RecordId::from("rec2")];
        let updates = restock(&ids);
        assert_eq!(
            serde_json::to_value(&updates).unwrap(),
            json!([
                {"record_id": "rec1", "fields": {"Quantity": 100.0, "Description": "Batch update #1"}},
                {"record_id": "rec2", "fields": {"Quantity": 110.0, "Description": "Batch update #2"}}
            ])
        );
    }
}
