use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::quantize;
use rust_decimal::Decimal;
use sqlx::SqlitePool;

const TRANSACTION_COLUMNS: &str = "t.id, t.user_id, u.username, t.title, t.description, \
     t.amount, t.transaction_type, t.tax, t.tax_type, t.created_at, t.updated_at";

#[derive(Clone)]
pub struct ExpenseService {
    pool: SqlitePool,
}

impl ExpenseService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        principal: &Principal,
        request: TransactionRequest,
    ) -> AppResult<TransactionResponse> {
        validate_request(&request)?;

        // 所有者永远是调用者本人, 请求体中不接受所有者字段
        let id = sqlx::query(
            r#"
            INSERT INTO transactions (user_id, title, description, amount, transaction_type, tax, tax_type)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(principal.user_id)
        .bind(request.title.trim())
        .bind(&request.description)
        .bind(quantize(request.amount).to_string())
        .bind(request.transaction_type)
        .bind(quantize(request.tax()).to_string())
        .bind(request.tax_type())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        let transaction = self.visible_transaction(principal, id).await?;
        Ok(TransactionResponse::from(transaction))
    }

    pub async fn list(
        &self,
        principal: &Principal,
        query: &PageQuery,
    ) -> AppResult<Page<TransactionListItem>> {
        let count: i64 = if principal.is_superuser {
            sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT COUNT(*) FROM transactions WHERE user_id = ?")
                .bind(principal.user_id)
                .fetch_one(&self.pool)
                .await?
        };

        // 超出范围的页码按不存在处理
        if query.page() > 1 && query.offset() >= count {
            return Err(AppError::NotFound("无效的页码".to_string()));
        }

        let transactions = if principal.is_superuser {
            sqlx::query_as::<_, Transaction>(&format!(
                r#"
                SELECT {TRANSACTION_COLUMNS}
                FROM transactions t
                JOIN users u ON u.id = t.user_id
                ORDER BY t.created_at DESC, t.id DESC
                LIMIT ? OFFSET ?
                "#
            ))
            .bind(query.limit())
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Transaction>(&format!(
                r#"
                SELECT {TRANSACTION_COLUMNS}
                FROM transactions t
                JOIN users u ON u.id = t.user_id
                WHERE t.user_id = ?
                ORDER BY t.created_at DESC, t.id DESC
                LIMIT ? OFFSET ?
                "#
            ))
            .bind(principal.user_id)
            .bind(query.limit())
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?
        };

        let items = transactions
            .into_iter()
            .map(TransactionListItem::from)
            .collect();

        Ok(Page {
            count,
            number: query.page(),
            size: query.page_size(),
            items,
        })
    }

    pub async fn retrieve(&self, principal: &Principal, id: i64) -> AppResult<TransactionResponse> {
        let transaction = self.visible_transaction(principal, id).await?;
        Ok(TransactionResponse::from(transaction))
    }

    /// 全量更新, 所有必填字段都要重新提供, 所有者不可变
    pub async fn update(
        &self,
        principal: &Principal,
        id: i64,
        request: TransactionRequest,
    ) -> AppResult<TransactionResponse> {
        validate_request(&request)?;

        let existing = self.visible_transaction(principal, id).await?;

        sqlx::query(
            r#"
            UPDATE transactions
            SET title = ?, description = ?, amount = ?, transaction_type = ?,
                tax = ?, tax_type = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(request.title.trim())
        .bind(&request.description)
        .bind(quantize(request.amount).to_string())
        .bind(request.transaction_type)
        .bind(quantize(request.tax()).to_string())
        .bind(request.tax_type())
        .bind(existing.id)
        .execute(&self.pool)
        .await?;

        let transaction = self.visible_transaction(principal, id).await?;
        Ok(TransactionResponse::from(transaction))
    }

    /// 永久删除, 重复删除返回 NotFound
    pub async fn delete(&self, principal: &Principal, id: i64) -> AppResult<()> {
        let existing = self.visible_transaction(principal, id).await?;

        sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(existing.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// 记录不存在与无权访问对外表现一致, 都按 NotFound 处理
    async fn visible_transaction(&self, principal: &Principal, id: i64) -> AppResult<Transaction> {
        let transaction = sqlx::query_as::<_, Transaction>(&format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions t
            JOIN users u ON u.id = t.user_id
            WHERE t.id = ?
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match transaction {
            Some(t) if principal.can_access(t.user_id) => Ok(t),
            _ => Err(AppError::NotFound("记录不存在".to_string())),
        }
    }
}

fn validate_request(request: &TransactionRequest) -> AppResult<()> {
    if request.title.trim().is_empty() {
        return Err(AppError::field_validation("title", "标题不能为空"));
    }

    if request.amount <= Decimal::ZERO {
        return Err(AppError::field_validation("amount", "金额必须为正数"));
    }
    validate_digits("amount", request.amount)?;

    let tax = request.tax();
    if tax < Decimal::ZERO {
        return Err(AppError::field_validation("tax", "税额不能为负数"));
    }
    validate_digits("tax", tax)?;

    Ok(())
}

// 十进制字段约束: 最多两位小数, 整体不超过10位有效数字
fn validate_digits(field: &str, value: Decimal) -> AppResult<()> {
    if value.round_dp(2) != value {
        return Err(AppError::field_validation(field, "最多保留两位小数"));
    }
    if value.abs() >= Decimal::from(100_000_000) {
        return Err(AppError::field_validation(field, "数值超出范围"));
    }
    Ok(())
}
