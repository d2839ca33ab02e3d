use crate::error::AppError;
use crate::models::*;
use crate::services::ExpenseService;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, ResponseError, Result, web};

// 从请求扩展中取出认证中间件写入的主体
fn principal_from_request(req: &HttpRequest) -> Result<Principal, AppError> {
    req.extensions()
        .get::<Principal>()
        .cloned()
        .ok_or_else(|| AppError::AuthError("缺少访问令牌".to_string()))
}

#[utoipa::path(
    get,
    path = "/expenses",
    tag = "expense",
    params(
        ("page" = Option<u32>, Query, description = "页码"),
        ("page_size" = Option<u32>, Query, description = "每页数量, 默认10, 上限100")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取收支列表成功", body = PaginatedTransactionList),
        (status = 401, description = "未认证", body = ErrorResponse),
        (status = 404, description = "无效的页码", body = ErrorResponse)
    )
)]
pub async fn list_expenses(
    expense_service: web::Data<ExpenseService>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    let principal = match principal_from_request(&req) {
        Ok(principal) => principal,
        Err(e) => return Ok(e.error_response()),
    };

    match expense_service.list(&principal, &query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(Paginated::from_page(page, &req))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/expenses",
    tag = "expense",
    request_body = TransactionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "创建成功", body = TransactionResponse),
        (status = 400, description = "请求参数错误", body = ErrorResponse),
        (status = 401, description = "未认证", body = ErrorResponse)
    )
)]
pub async fn create_expense(
    expense_service: web::Data<ExpenseService>,
    req: HttpRequest,
    request: web::Json<TransactionRequest>,
) -> Result<HttpResponse> {
    let principal = match principal_from_request(&req) {
        Ok(principal) => principal,
        Err(e) => return Ok(e.error_response()),
    };

    match expense_service
        .create(&principal, request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Created().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/expenses/{id}",
    tag = "expense",
    params(
        ("id" = i64, Path, description = "记录ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取成功", body = TransactionResponse),
        (status = 401, description = "未认证", body = ErrorResponse),
        (status = 404, description = "记录不存在或不可见", body = ErrorResponse)
    )
)]
pub async fn retrieve_expense(
    expense_service: web::Data<ExpenseService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let principal = match principal_from_request(&req) {
        Ok(principal) => principal,
        Err(e) => return Ok(e.error_response()),
    };

    match expense_service
        .retrieve(&principal, path.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/expenses/{id}",
    tag = "expense",
    params(
        ("id" = i64, Path, description = "记录ID")
    ),
    request_body = TransactionRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "更新成功", body = TransactionResponse),
        (status = 400, description = "请求参数错误", body = ErrorResponse),
        (status = 401, description = "未认证", body = ErrorResponse),
        (status = 404, description = "记录不存在或不可见", body = ErrorResponse)
    )
)]
pub async fn update_expense(
    expense_service: web::Data<ExpenseService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<TransactionRequest>,
) -> Result<HttpResponse> {
    let principal = match principal_from_request(&req) {
        Ok(principal) => principal,
        Err(e) => return Ok(e.error_response()),
    };

    match expense_service
        .update(&principal, path.into_inner(), request.into_inner())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/expenses/{id}",
    tag = "expense",
    params(
        ("id" = i64, Path, description = "记录ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "删除成功"),
        (status = 401, description = "未认证", body = ErrorResponse),
        (status = 404, description = "记录不存在或不可见", body = ErrorResponse)
    )
)]
pub async fn delete_expense(
    expense_service: web::Data<ExpenseService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let principal = match principal_from_request(&req) {
        Ok(principal) => principal,
        Err(e) => return Ok(e.error_response()),
    };

    match expense_service.delete(&principal, path.into_inner()).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn expense_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/expenses")
            .route("", web::get().to(list_expenses))
            .route("", web::post().to(create_expense))
            .route("/{id}", web::get().to(retrieve_expense))
            .route("/{id}", web::put().to(update_expense))
            .route("/{id}", web::delete().to(delete_expense)),
    );
}
