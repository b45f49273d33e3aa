//! Bitable (multi-dimensional table) operations.

use reqwest::Method;
use tracing::{debug, warn};

use feishu_shared::constants::{BITABLE_PREFIX, MAX_PAGE_SIZE};
use feishu_shared::{AppToken, FieldSpec, Fields, RecordId, TableId};

use crate::client::FeishuClient;
use crate::error::Result;
use crate::types::{
    BatchCreateRequest, BatchUpdateRequest, CreateAppData, CreateAppRequest, CreateTableData,
    CreateTableRequest, Page, Record, RecordBody, RecordData, RecordPage, RecordUpdate,
    RecordsData, TableInfo, TableSpec,
};

fn tables_path(app: &AppToken) -> String {
    format!("{BITABLE_PREFIX}/apps/{app}/tables")
}

fn records_path(app: &AppToken, table: &TableId) -> String {
    format!("{BITABLE_PREFIX}/apps/{app}/tables/{table}/records")
}

/// Idempotency key for create calls, so a duplicated request does not
/// insert the same rows twice.
fn client_token() -> Vec<(&'static str, String)> {
    vec![("client_token", uuid::Uuid::new_v4().to_string())]
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

impl FeishuClient {
    // ==================== Apps & tables ====================

    /// Create a Bitable app. An empty `folder_token` puts it in the root
    /// folder of the app's drive.
    pub async fn create_app(&self, name: &str, folder_token: &str) -> Result<AppToken> {
        let body = CreateAppRequest {
            name,
            folder_token: non_empty(folder_token),
        };
        let data: CreateAppData = self
            .post(&format!("{BITABLE_PREFIX}/apps"), &[], &body, "app")
            .await?;
        debug!(app = %data.app.app_token, "Created app");
        Ok(data.app.app_token)
    }

    pub async fn create_table(
        &self,
        app: &AppToken,
        name: &str,
        fields: &[FieldSpec],
    ) -> Result<TableId> {
        let body = CreateTableRequest {
            table: TableSpec { name, fields },
        };
        let data: CreateTableData = self.post(&tables_path(app), &[], &body, "table_id").await?;
        debug!(%app, table = %data.table_id, "Created table");
        Ok(data.table_id)
    }

    /// Create an app, then one table in it.
    ///
    /// If the table cannot be created the app is left in place and the
    /// error is returned.
    pub async fn create_app_and_table(
        &self,
        app_name: &str,
        folder_token: &str,
        table_name: &str,
        fields: &[FieldSpec],
    ) -> Result<(AppToken, TableId)> {
        let app = self.create_app(app_name, folder_token).await?;
        let table = self.create_table(&app, table_name, fields).await?;
        Ok((app, table))
    }

    pub async fn list_tables(&self, app: &AppToken) -> Result<Vec<TableInfo>> {
        let page: Page<TableInfo> = self.get(&tables_path(app), &[], "tables").await?;
        Ok(page.items)
    }

    // ==================== Records ====================

    pub async fn create_record(
        &self,
        app: &AppToken,
        table: &TableId,
        fields: &Fields,
    ) -> Result<RecordId> {
        let data: RecordData = self
            .post(
                &records_path(app, table),
                &client_token(),
                &RecordBody { fields },
                "record",
            )
            .await?;
        Ok(data.record.record_id)
    }

    /// Ids come back in the order of `records`.
    pub async fn batch_create_records(
        &self,
        app: &AppToken,
        table: &TableId,
        records: &[Fields],
    ) -> Result<Vec<RecordId>> {
        let body = BatchCreateRequest {
            records: records.iter().map(|fields| RecordBody { fields }).collect(),
        };
        let data: RecordsData = self
            .post(
                &format!("{}/batch_create", records_path(app, table)),
                &client_token(),
                &body,
                "records",
            )
            .await?;
        Ok(data.records.into_iter().map(|r| r.record_id).collect())
    }

    /// Overwrite the given fields; fields not mentioned keep their values.
    pub async fn update_record(
        &self,
        app: &AppToken,
        table: &TableId,
        record: &RecordId,
        fields: &Fields,
    ) -> Result<()> {
        let path = format!("{}/{record}", records_path(app, table));
        let request = self
            .request(Method::PUT, &path)
            .await?
            .json(&RecordBody { fields });
        self.send_ack(request).await
    }

    pub async fn batch_update_records(
        &self,
        app: &AppToken,
        table: &TableId,
        records: &[RecordUpdate],
    ) -> Result<()> {
        let path = format!("{}/batch_update", records_path(app, table));
        let request = self
            .request(Method::POST, &path)
            .await?
            .json(&BatchUpdateRequest { records });
        self.send_ack(request).await
    }

    pub async fn delete_record(
        &self,
        app: &AppToken,
        table: &TableId,
        record: &RecordId,
    ) -> Result<()> {
        let path = format!("{}/{record}", records_path(app, table));
        let request = self.request(Method::DELETE, &path).await?;
        self.send_ack(request).await
    }

    /// One page of records. `page_size` is clamped to the platform maximum.
    pub async fn list_records(
        &self,
        app: &AppToken,
        table: &TableId,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<RecordPage> {
        let mut query = vec![("page_size", page_size.clamp(1, MAX_PAGE_SIZE).to_string())];
        if let Some(token) = page_token.filter(|t| !t.is_empty()) {
            query.push(("page_token", token.to_string()));
        }
        self.get(&records_path(app, table), &query, "records").await
    }

    /// Every record of the table, following page tokens until the listing
    /// reports no more pages.
    pub async fn list_all_records(
        &self,
        app: &AppToken,
        table: &TableId,
        page_size: u32,
    ) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page = self
                .list_records(app, table, page_size, page_token.as_deref())
                .await?;
            let next = page.next_page_token().map(str::to_string);
            records.extend(page.items);
            match next {
                Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                    warn!(page_token = %token, "Listing repeated its page token, stopping");
                    break;
                }
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
        debug!(%table, count = records.len(), "Listed all records");
        Ok(records)
    }

    pub async fn get_record(
        &self,
        app: &AppToken,
        table: &TableId,
        record: &RecordId,
    ) -> Result<Record> {
        let path = format!("{}/{record}", records_path(app, table));
        let data: RecordData = self.get(&path, &[], "record").await?;
        Ok(data.record)
    }
}
