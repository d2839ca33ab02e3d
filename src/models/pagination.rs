//! 分页参数与分页响应

use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::TransactionListItem;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() as i64 - 1) * self.page_size() as i64
    }

    pub fn limit(&self) -> i64 {
        self.page_size() as i64
    }
}

/// 服务层返回的一页数据, 链接由处理器依据请求地址补全
#[derive(Debug)]
pub struct Page<T> {
    pub count: i64,
    pub number: u32,
    pub size: u32,
    pub items: Vec<T>,
}

#[derive(Debug, Serialize, ToSchema)]
#[aliases(PaginatedTransactionList = Paginated<TransactionListItem>)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn from_page(page: Page<T>, req: &HttpRequest) -> Self {
        let info = req.connection_info();
        let base = format!("{}://{}{}", info.scheme(), info.host(), req.path());

        let total_pages = if page.count == 0 {
            1
        } else {
            ((page.count as f64) / (page.size as f64)).ceil() as u32
        };

        let link = |number: u32| format!("{base}?page={number}&page_size={}", page.size);
        let next = (page.number < total_pages).then(|| link(page.number + 1));
        let previous = (page.number > 1).then(|| link(page.number - 1));

        Self {
            count: page.count,
            next,
            previous,
            results: page.items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_page_query_defaults_and_clamping() {
        let query = PageQuery {
            page: None,
            page_size: None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(query.offset(), 0);

        let query = PageQuery {
            page: Some(3),
            page_size: Some(500),
        };
        assert_eq!(query.page_size(), MAX_PAGE_SIZE);
        assert_eq!(query.offset(), 200);
    }

    #[test]
    fn test_links_on_middle_page() {
        let req = TestRequest::with_uri("/expenses?page=2&page_size=2").to_http_request();
        let page = Page {
            count: 5,
            number: 2,
            size: 2,
            items: vec![1, 2],
        };

        let paginated = Paginated::from_page(page, &req);
        assert_eq!(paginated.count, 5);
        let next = paginated.next.unwrap();
        let previous = paginated.previous.unwrap();
        assert!(next.ends_with("/expenses?page=3&page_size=2"));
        assert!(previous.ends_with("/expenses?page=1&page_size=2"));
    }

    #[test]
    fn test_links_on_single_page() {
        let req = TestRequest::with_uri("/expenses").to_http_request();
        let page: Page<i32> = Page {
            count: 3,
            number: 1,
            size: 10,
            items: vec![1, 2, 3],
        };

        let paginated = Paginated::from_page(page, &req);
        assert!(paginated.next.is_none());
        assert!(paginated.previous.is_none());
    }

    #[test]
    fn test_links_on_empty_result() {
        let req = TestRequest::with_uri("/expenses").to_http_request();
        let page: Page<i32> = Page {
            count: 0,
            number: 1,
            size: 10,
            items: vec![],
        };

        let paginated = Paginated::from_page(page, &req);
        assert_eq!(paginated.count, 0);
        assert!(paginated.next.is_none());
        assert!(paginated.previous.is_none());
    }
}
