use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::refresh,
        handlers::expense::list_expenses,
        handlers::expense::create_expense,
        handlers::expense::retrieve_expense,
        handlers::expense::update_expense,
        handlers::expense::delete_expense,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            TokenPairResponse,
            RefreshRequest,
            AccessTokenResponse,
            MessageResponse,
            ErrorResponse,
            ApiError,
            TransactionRequest,
            TransactionResponse,
            TransactionListItem,
            PaginatedTransactionList,
            TransactionType,
            TaxType,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "注册与令牌"),
        (name = "expense", description = "收支记录")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
