//! Integration tests for pagination sessions
//!
//! Tests the full caller flow: config → first request → query → page →
//! derived request → next query, for both offset and keyset pages.

use data_pages::provider::datasets;
use data_pages::{
    load_config, Cursor, CursoredPageRecord, Error, InMemoryRepository, KeyValue, Keyed, Mode,
    Order, Page, PageRecord, PageRequest, PagingMode, Sort,
};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::io::Write;

#[derive(Debug, Clone, PartialEq)]
struct Product {
    id: i64,
    name: String,
    price: f64,
}

impl Product {
    fn new(id: i64, name: &str, price: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            price,
        }
    }
}

impl Keyed for Product {
    fn key_value(&self, property: &str) -> Option<KeyValue> {
        match property {
            "id" => Some(KeyValue::Int(self.id)),
            "name" => Some(KeyValue::Text(self.name.clone())),
            "price" => Some(KeyValue::Float(self.price)),
            _ => None,
        }
    }
}

fn catalog() -> InMemoryRepository<Product> {
    InMemoryRepository::new(
        "products",
        vec![
            Product::new(1, "kettle", 25.0),
            Product::new(2, "toaster", 19.5),
            Product::new(3, "mug", 4.0),
            Product::new(4, "teapot", 19.5),
            Product::new(5, "spoon", 1.25),
            Product::new(6, "plate", 4.0),
            Product::new(7, "bowl", 4.0),
        ],
    )
}

fn ids<'a>(page: impl IntoIterator<Item = &'a Product>) -> Vec<i64> {
    page.into_iter().map(|p| p.id).collect()
}

/// Drain every page of a session starting at `request`
fn collect_all<P, F>(mut request: PageRequest<Product>, query: F) -> Vec<Vec<i64>>
where
    P: Page<Product>,
    F: Fn(&PageRequest<Product>) -> data_pages::Result<P>,
{
    let mut pages = Vec::new();
    loop {
        let page = query(&request).unwrap();
        pages.push(page.iter().map(|p| p.id).collect());
        if !page.has_next() {
            return pages;
        }
        request = page.next_page_request().unwrap();
    }
}

// ============================================================================
// Pagination Session Tests
// ============================================================================

#[test]
fn test_offset_session_with_typed_entities() {
    let repo = catalog();
    let order = Order::by([Sort::asc("price"), Sort::asc("id")]);
    let request = PageRequest::of_size(3).unwrap().with_order(order);

    let pages = collect_all(request, |r| repo.find_page(r));
    assert_eq!(pages, vec![vec![5, 3, 6], vec![7, 2, 4], vec![1]]);
}

#[test]
fn test_cursor_session_matches_offset_session() {
    let repo = catalog();
    let order = Order::by([Sort::desc("price"), Sort::asc("id")]);
    let request = PageRequest::of_size(2).unwrap().with_order(order);

    let offset = collect_all(request.clone(), |r| repo.find_page(r));
    let cursored = collect_all(request, |r| repo.find_cursored(r));
    assert_eq!(offset, cursored);
    assert_eq!(cursored[0], vec![1, 2]);
}

#[test]
fn test_cursor_session_resumes_from_token() {
    let repo = catalog();
    let request = PageRequest::of_size(3)
        .unwrap()
        .with_order(Order::parse("name:asc").unwrap());

    let first = repo.find_cursored(&request).unwrap();
    assert_eq!(ids(&first), vec![7, 1, 3]);

    // The caller keeps only the token between calls
    let token = first.cursor(first.number_of_elements() - 1).unwrap().encode();
    let cursor = Cursor::decode(&token).unwrap();
    assert_eq!(cursor.elements(), &[KeyValue::Text("mug".into())]);

    let resumed = PageRequest::after_cursor(cursor, 2, 3, true)
        .unwrap()
        .with_order(Sort::asc("name"));
    let second = repo.find_cursored(&resumed).unwrap();
    assert_eq!(ids(&second), vec![6, 5, 4]);
    assert_eq!(second, repo.find_cursored(&first.next_page_request().unwrap()).unwrap());
}

#[test]
fn test_cursor_session_backward_from_last_page() {
    let repo = catalog();
    let request = PageRequest::new(3, 3)
        .unwrap()
        .with_order(Sort::asc("id"));

    let last = repo.find_cursored(&request).unwrap();
    assert_eq!(ids(&last), vec![7]);
    assert!(!last.has_next());
    assert!(last.next_page_request().unwrap_err().is_no_such_element());

    let middle = repo
        .find_cursored(&last.previous_page_request().unwrap())
        .unwrap();
    assert_eq!(middle.page_request().mode(), Mode::CursorPrevious);
    assert_eq!(ids(&middle), vec![4, 5, 6]);
}

#[test]
fn test_narrowed_request_reused_for_another_entity() {
    let products = catalog();
    let page = products
        .find_page(&PageRequest::new(1, 2).unwrap().with_order(Sort::asc("id")))
        .unwrap();

    let request: PageRequest<Value> = page.next_page_request_as().unwrap();
    let rows = InMemoryRepository::new("numbers", datasets::positive_integers());
    let numbers = rows.find_page(&request).unwrap();
    let found: Vec<i64> = numbers.iter().map(|v| v["id"].as_i64().unwrap()).collect();
    assert_eq!(found, vec![3, 4]);
}

// ============================================================================
// Page Construction By A Query Layer
// ============================================================================

#[test]
fn test_query_layer_builds_pages_directly() {
    let request = PageRequest::new(1, 10).unwrap();

    let page = PageRecord::with_total(request.clone(), (1..=10).collect::<Vec<u32>>(), 25).unwrap();
    assert!(page.more_results());
    assert_eq!(page.next_page_request().unwrap().page(), 2);
    assert_eq!(page.total_pages().unwrap(), 3);

    let unknown = PageRecord::new(request.clone(), vec![1u32, 2], None, false).unwrap();
    assert!(matches!(
        unknown.total_pages().unwrap_err(),
        Error::IllegalState { .. }
    ));

    let too_many = PageRecord::with_total(request, (0..11).collect::<Vec<u32>>(), 11);
    assert!(matches!(too_many.unwrap_err(), Error::InvalidPage { .. }));
}

#[test]
fn test_cursored_page_built_by_query_layer() {
    let request = PageRequest::new(2, 2).unwrap().with_order(Sort::asc("id"));
    let entries = vec![
        ("c", Cursor::for_key([3]).unwrap()),
        ("d", Cursor::for_key([4]).unwrap()),
    ];
    let page = CursoredPageRecord::new(request, entries, None, true)
        .unwrap()
        .with_has_previous(false);

    assert_eq!(page.content(), &["c", "d"]);
    assert!(!page.has_previous());
    assert!(page.previous_page_request().unwrap_err().is_no_such_element());

    let next = page.next_page_request().unwrap();
    assert_eq!(next.page(), 3);
    assert_eq!(next.cursor().unwrap().elements(), &[KeyValue::Int(4)]);
    assert_eq!(next.order().to_string(), "id:asc");
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_session_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "default_page_size: 4").unwrap();
    writeln!(file, "max_page_size: 8").unwrap();
    writeln!(file, "request_total: false").unwrap();
    writeln!(file, "mode: cursor").unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.mode, PagingMode::Cursor);

    let repo = catalog().with_config(config.clone());
    let request = config.first_request(Order::from(Sort::asc("id"))).unwrap();
    assert!(!request.request_total());

    let first = repo.find_cursored(&request).unwrap();
    assert_eq!(ids(&first), vec![1, 2, 3, 4]);
    assert!(!first.has_totals());
    assert!(first.has_next());

    let oversized = request.with_size(9).unwrap();
    assert!(repo.find_cursored(&oversized).unwrap_err().is_caller_error());
}

#[test]
fn test_invalid_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "default_page_size: 50").unwrap();
    writeln!(file, "max_page_size: 20").unwrap();
    assert!(matches!(
        load_config(file.path()).unwrap_err(),
        Error::Config { .. }
    ));

    assert!(load_config("/nonexistent/pagination.yaml").is_err());
}

// ============================================================================
// Dataset Tests
// ============================================================================

#[test]
fn test_ascii_characters_by_hexadecimal() {
    let repo = InMemoryRepository::new("ascii", datasets::ascii_characters());
    let request = PageRequest::new(5, 16)
        .unwrap()
        .with_order(Sort::desc("hexadecimal"));

    let page = repo.find_page(&request).unwrap();
    assert_eq!(page.total_pages().unwrap(), 8);
    assert_eq!(page.content()[0]["hexadecimal"], "3f");
    assert_eq!(page.content()[15]["hexadecimal"], "30");
}

#[test]
fn test_positive_integers_primes_only() {
    let repo = InMemoryRepository::new("numbers", datasets::positive_integers());
    repo.remove_where(|row| row["numType"] != "PRIME");
    assert_eq!(repo.count(), 25);

    let request = PageRequest::new(3, 10)
        .unwrap()
        .with_order(Sort::asc("id"));
    let page = repo.find_page(&request).unwrap();
    let primes: Vec<i64> = page.iter().map(|v| v["id"].as_i64().unwrap()).collect();
    assert_eq!(primes, vec![73, 79, 83, 89, 97]);
    assert!(!page.has_next());
}
