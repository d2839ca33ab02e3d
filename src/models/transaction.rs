use crate::utils::total_amount;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use std::str::FromStr;
use utoipa::ToSchema;

/// 详情中时间戳的展示格式, 如 "2026-08-06 01:30 PM"
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TransactionType {
    Debit,
    Credit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TaxType {
    Flat,
    Percentage,
}

/// 数据库中的收支记录, 总是连同所有者用户名一起查出
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub tax: Decimal,
    pub tax_type: TaxType,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// 金额以十进制文本存储, 手动解码
fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let text: String = row.try_get(column)?;
    Decimal::from_str(&text).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl FromRow<'_, SqliteRow> for Transaction {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            username: row.try_get("username")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            amount: decimal_column(row, "amount")?,
            transaction_type: row.try_get("transaction_type")?,
            tax: decimal_column(row, "tax")?,
            tax_type: row.try_get("tax_type")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// 创建与全量更新共用的请求体
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionRequest {
    #[schema(example = "Lunch")]
    pub title: String,
    #[schema(example = "Business lunch")]
    pub description: Option<String>,
    #[schema(example = "100.00")]
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    #[schema(example = "10.00")]
    pub tax: Option<Decimal>,
    pub tax_type: Option<TaxType>,
}

impl TransactionRequest {
    pub fn tax(&self) -> Decimal {
        self.tax.unwrap_or(Decimal::ZERO)
    }

    pub fn tax_type(&self) -> TaxType {
        self.tax_type.unwrap_or(TaxType::Flat)
    }
}

/// 详情视图, 含派生的 total_amount
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i64,
    pub user: String,
    pub title: String,
    pub description: Option<String>,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub tax: Decimal,
    pub tax_type: TaxType,
    pub total_amount: Decimal,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Transaction> for TransactionResponse {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            user: t.username,
            title: t.title,
            description: t.description,
            amount: t.amount,
            transaction_type: t.transaction_type,
            tax: t.tax,
            tax_type: t.tax_type,
            total_amount: total_amount(t.amount, t.tax, t.tax_type),
            created_at: t.created_at.format(TIMESTAMP_FORMAT).to_string(),
            updated_at: t.updated_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// 列表视图, 省略描述/税费/所有者等字段
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionListItem {
    pub id: i64,
    pub title: String,
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub total_amount: Decimal,
    pub created_at: NaiveDateTime,
}

impl From<Transaction> for TransactionListItem {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            title: t.title,
            amount: t.amount,
            transaction_type: t.transaction_type,
            total_amount: total_amount(t.amount, t.tax, t.tax_type),
            created_at: t.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Transaction {
        Transaction {
            id: 1,
            user_id: 7,
            username: "alice".to_string(),
            title: "Lunch".to_string(),
            description: Some("desc".to_string()),
            amount: Decimal::from_str("100.00").unwrap(),
            transaction_type: TransactionType::Debit,
            tax: Decimal::from_str("10.00").unwrap(),
            tax_type: TaxType::Flat,
            created_at: NaiveDate::from_ymd_opt(2026, 8, 6)
                .unwrap()
                .and_hms_opt(13, 30, 0)
                .unwrap(),
            updated_at: NaiveDate::from_ymd_opt(2026, 8, 6)
                .unwrap()
                .and_hms_opt(13, 30, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_detail_response_computes_total_and_formats_timestamps() {
        let response = TransactionResponse::from(sample());

        assert_eq!(response.user, "alice");
        assert_eq!(response.total_amount.to_string(), "110.00");
        assert_eq!(response.created_at, "2026-08-06 01:30 PM");
    }

    #[test]
    fn test_list_item_carries_total() {
        let mut t = sample();
        t.tax_type = TaxType::Percentage;
        let item = TransactionListItem::from(t);

        assert_eq!(item.total_amount.to_string(), "110.00");
    }

    #[test]
    fn test_enums_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&TransactionType::Debit).unwrap(),
            "\"debit\""
        );
        assert_eq!(
            serde_json::to_string(&TaxType::Percentage).unwrap(),
            "\"percentage\""
        );
    }
}
