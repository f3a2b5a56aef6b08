//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, QueryArgs};
use crate::config::{load_config, PaginationConfig, PagingMode};
use crate::error::{Error, Result, ResultExt};
use crate::page::{Cursor, CursoredPageRecord, Page, PageRecord, PageRequest};
use crate::provider::{datasets, InMemoryRepository};
use crate::sort::Order;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Datasets => self.list_datasets(),
            Commands::Page {
                query,
                page,
                after,
                before,
            } => {
                let repo = open_repository(query, &config)?;
                let request =
                    build_request(query, &config, *page, after.as_deref(), before.as_deref())?;
                self.fetch_page(&repo, &request, cursor_mode(query, &config))
            }
            Commands::Walk { query, max_pages } => {
                let repo = open_repository(query, &config)?;
                let request = build_request(query, &config, 1, None, None)?;
                self.walk(&repo, request, cursor_mode(query, &config), *max_pages)
            }
        }
    }

    fn load_config(&self) -> Result<PaginationConfig> {
        match &self.cli.config {
            Some(path) => {
                let config = load_config(path)?;
                debug!(path = %path.display(), ?config, "Loaded pagination config");
                Ok(config)
            }
            None => Ok(PaginationConfig::default()),
        }
    }

    /// List built-in datasets
    fn list_datasets(&self) -> Result<()> {
        let datasets: Vec<Value> = datasets::list_builtin()
            .into_iter()
            .map(|name| {
                let rows = datasets::get_builtin(name).map_or(0, |rows| rows.len());
                json!({ "name": name, "rows": rows })
            })
            .collect();

        self.output_message(&json!({
            "type": "DATASETS",
            "datasets": datasets
        }));

        Ok(())
    }

    /// Fetch and print one page
    fn fetch_page(
        &self,
        repo: &InMemoryRepository<Value>,
        request: &PageRequest<Value>,
        cursored: bool,
    ) -> Result<()> {
        let message = if cursored || request.mode().is_cursor() {
            cursored_message(&repo.find_cursored(request)?)
        } else {
            offset_message(&repo.find_page(request)?)
        };
        self.output_message(&message);
        Ok(())
    }

    /// Fetch pages until the last one, printing each
    fn walk(
        &self,
        repo: &InMemoryRepository<Value>,
        mut request: PageRequest<Value>,
        cursored: bool,
        max_pages: Option<u64>,
    ) -> Result<()> {
        let mut pages = 0u64;
        let mut rows = 0u64;

        loop {
            if max_pages.is_some_and(|max| pages >= max) {
                info!(pages, "Reached page limit");
                break;
            }

            let (message, next) = if cursored {
                let page = repo.find_cursored(&request)?;
                rows += page.number_of_elements() as u64;
                (cursored_message(&page), next_request(&page)?)
            } else {
                let page = repo.find_page(&request)?;
                rows += page.number_of_elements() as u64;
                (offset_message(&page), next_request(&page)?)
            };
            pages += 1;
            self.output_message(&message);

            match next {
                Some(next) => request = next,
                None => break,
            }
        }

        info!(dataset = repo.name(), pages, rows, "Walk complete");
        self.output_message(&json!({
            "type": "WALK_COMPLETE",
            "dataset": repo.name(),
            "pages": pages,
            "rows": rows
        }));

        Ok(())
    }

    /// Output a JSON message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Open the repository named by `--dataset` or loaded from `--data`
fn open_repository(
    query: &QueryArgs,
    config: &PaginationConfig,
) -> Result<InMemoryRepository<Value>> {
    let (name, rows) = match (&query.dataset, &query.data) {
        (Some(name), _) => {
            let rows = datasets::get_builtin(name).ok_or_else(|| {
                Error::config(format!(
                    "Unknown dataset '{name}'. Available: {}",
                    datasets::list_builtin().join(", ")
                ))
            })?;
            (name.clone(), rows)
        }
        (None, Some(path)) => (path.display().to_string(), load_rows(path)?),
        (None, None) => {
            return Err(Error::config("Either --dataset or --data is required"));
        }
    };

    debug!(dataset = %name, rows = rows.len(), "Opened repository");
    Ok(InMemoryRepository::new(name, rows).with_config(config.clone()))
}

/// Read a JSON array of rows from a file
fn load_rows(path: &Path) -> Result<Vec<Value>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file '{}'", path.display()))?;
    let value: Value = serde_json::from_str(&content)?;
    match value {
        Value::Array(rows) => Ok(rows),
        _ => Err(Error::config(format!(
            "Data file '{}' must hold a JSON array",
            path.display()
        ))),
    }
}

fn cursor_mode(query: &QueryArgs, config: &PaginationConfig) -> bool {
    query.mode.map_or(config.mode, PagingMode::from) == PagingMode::Cursor
}

/// Build the request for `page`, or for the page adjacent to a cursor token
fn build_request(
    query: &QueryArgs,
    config: &PaginationConfig,
    page: u64,
    after: Option<&str>,
    before: Option<&str>,
) -> Result<PageRequest<Value>> {
    let size = query.size.unwrap_or(config.default_page_size);
    let order = Order::parse(&query.sort)?;
    let request_total = config.request_total && !query.no_total;

    let request = match (after, before) {
        (Some(token), _) => {
            PageRequest::after_cursor(Cursor::decode(token)?, page, size, request_total)?
        }
        (None, Some(token)) => {
            PageRequest::before_cursor(Cursor::decode(token)?, page, size, request_total)?
        }
        (None, None) => {
            let request = PageRequest::new(page, size)?;
            if request_total {
                request.with_total()
            } else {
                request.without_total()
            }
        }
    };

    Ok(request.with_order(order))
}

fn next_request<P: Page<Value>>(page: &P) -> Result<Option<PageRequest<Value>>> {
    if page.has_next() {
        page.next_page_request().map(Some)
    } else {
        Ok(None)
    }
}

/// Fields shared by both page flavors
fn page_fields(page: &dyn Page<Value>) -> serde_json::Map<String, Value> {
    let request = page.page_request();
    let mut fields = serde_json::Map::new();
    fields.insert("type".into(), json!("PAGE"));
    fields.insert("request".into(), json!(request.to_string()));
    fields.insert("page".into(), json!(request.page()));
    fields.insert("size".into(), json!(request.size()));
    fields.insert("numberOfElements".into(), json!(page.number_of_elements()));
    if let Some(total) = page.known_total() {
        fields.insert("totalElements".into(), json!(total));
        fields.insert("totalPages".into(), json!(page.total_pages().ok()));
    }
    fields.insert("hasNext".into(), json!(page.has_next()));
    fields.insert("hasPrevious".into(), json!(page.has_previous()));
    fields.insert("content".into(), json!(page.content()));
    fields
}

fn offset_message(page: &PageRecord<Value>) -> Value {
    Value::Object(page_fields(page))
}

/// Page message carrying tokens for the adjacent pages
fn cursored_message(page: &CursoredPageRecord<Value>) -> Value {
    let mut fields = page_fields(page);
    let cursors = page.cursors();
    if page.has_next() {
        if let Some(last) = cursors.last() {
            fields.insert("nextCursor".into(), json!(last.encode()));
        }
    }
    if page.has_previous() {
        if let Some(first) = cursors.first() {
            fields.insert("previousCursor".into(), json!(first.encode()));
        }
    }
    Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{KeyValue, Mode};
    use clap::Parser;
    use std::io::Write;

    fn query(args: &[&str]) -> QueryArgs {
        let mut argv = vec!["data-pages", "walk"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Walk { query, .. } => query,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_page_command() {
        let cli = Cli::try_parse_from([
            "data-pages",
            "--format",
            "pretty",
            "page",
            "--dataset",
            "positive-integers",
            "--page",
            "3",
            "--size",
            "5",
            "--sort",
            "id:desc",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Pretty);
        match cli.command {
            Commands::Page { query, page, .. } => {
                assert_eq!(page, 3);
                assert_eq!(query.size, Some(5));
                assert_eq!(query.dataset.as_deref(), Some("positive-integers"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_after_conflicts_with_before() {
        let result = Cli::try_parse_from([
            "data-pages", "page", "--dataset", "x", "--after", "a", "--before", "b",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_request_uses_config_defaults() {
        let config = PaginationConfig {
            default_page_size: 25,
            request_total: false,
            ..Default::default()
        };
        let request = build_request(&query(&["--sort", "id"]), &config, 1, None, None).unwrap();

        assert_eq!(request.size(), 25);
        assert!(!request.request_total());
        assert_eq!(request.order().to_string(), "id:asc");
        assert_eq!(request.mode(), Mode::Offset);
    }

    #[test]
    fn test_build_request_from_token() {
        let token = Cursor::for_key([KeyValue::Int(40)]).unwrap().encode();
        let config = PaginationConfig::default();

        let request = build_request(
            &query(&["--size", "10", "--no-total"]),
            &config,
            5,
            Some(&token),
            None,
        )
        .unwrap();
        assert_eq!(request.mode(), Mode::CursorNext);
        assert_eq!(request.cursor().unwrap().elements(), &[KeyValue::Int(40)]);
        assert!(!request.request_total());

        let request = build_request(&query(&[]), &config, 4, None, Some(&token)).unwrap();
        assert_eq!(request.mode(), Mode::CursorPrevious);
    }

    #[test]
    fn test_build_request_rejects_bad_input() {
        let config = PaginationConfig::default();
        assert!(build_request(&query(&[]), &config, 0, None, None).is_err());
        assert!(build_request(&query(&["--sort", "id,id"]), &config, 1, None, None).is_err());
        assert!(build_request(&query(&[]), &config, 2, Some("%%%"), None).is_err());
    }

    #[test]
    fn test_cursor_mode_flag_overrides_config() {
        let config = PaginationConfig {
            mode: PagingMode::Cursor,
            ..Default::default()
        };
        assert!(cursor_mode(&query(&[]), &config));
        assert!(!cursor_mode(&query(&["--mode", "offset"]), &config));
        assert!(cursor_mode(
            &query(&["--mode", "cursor"]),
            &PaginationConfig::default()
        ));
    }

    #[test]
    fn test_open_repository() {
        let config = PaginationConfig::default();
        let repo = open_repository(&query(&["--dataset", "ascii-characters"]), &config).unwrap();
        assert_eq!(repo.count(), 128);

        assert!(open_repository(&query(&["--dataset", "nope"]), &config).is_err());
        assert!(open_repository(&query(&[]), &config).is_err());
    }

    #[test]
    fn test_open_repository_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 1}}, {{"id": 2}}]"#).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let repo =
            open_repository(&query(&["--data", path.as_str()]), &PaginationConfig::default())
                .unwrap();
        assert_eq!(repo.count(), 2);

        let mut object = tempfile::NamedTempFile::new().unwrap();
        write!(object, r#"{{"id": 1}}"#).unwrap();
        assert!(load_rows(object.path()).is_err());
    }

    #[test]
    fn test_cursored_message_tokens() {
        let repo = InMemoryRepository::new("numbers", datasets::positive_integers());
        let request = build_request(
            &query(&["--sort", "id", "--size", "10"]),
            &PaginationConfig::default(),
            2,
            None,
            None,
        )
        .unwrap();
        let message = cursored_message(&repo.find_cursored(&request).unwrap());

        assert_eq!(message["type"], "PAGE");
        assert_eq!(message["totalPages"], 10);
        assert_eq!(message["content"][0]["id"], 11);

        let next = Cursor::decode(message["nextCursor"].as_str().unwrap()).unwrap();
        assert_eq!(next.elements(), &[KeyValue::Int(20)]);
        let previous = Cursor::decode(message["previousCursor"].as_str().unwrap()).unwrap();
        assert_eq!(previous.elements(), &[KeyValue::Int(11)]);
    }

    #[test]
    fn test_offset_message_without_totals() {
        let repo = InMemoryRepository::new("numbers", datasets::positive_integers());
        let request = build_request(
            &query(&["--no-total"]),
            &PaginationConfig::default(),
            1,
            None,
            None,
        )
        .unwrap();
        let message = offset_message(&repo.find_page(&request).unwrap());

        assert!(message.get("totalElements").is_none());
        assert_eq!(message["hasNext"], true);
        assert_eq!(message["numberOfElements"], 10);
    }
}
