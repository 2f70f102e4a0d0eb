//! HTTP server for the interactive dashboard
//!
//! `trackboard serve tracks.csv` → loads the table once, starts a local
//! server, opens the browser, serves the dashboard page.
//!
//! The dataset is built before the request loop starts and never changes
//! afterwards; every chart request reads the same immutable snapshot. One
//! request maps to one chart builder via the dispatch table in [`charts`].

use crate::charts;
use crate::dataset::{Dataset, StreamCategory, StreamCutoffs};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tiny_http::{Header, Method, Request, Response, Server};

// Embed the UI directly in the binary
const UI_HTML: &str = include_str!("ui.html");

const CHART_ROUTE: &str = "/api/chart/";

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self { ok: true, data: Some(data), error: None }
    }
}

impl ApiResponse<()> {
    fn failure(message: String) -> Self {
        Self { ok: false, data: None, error: Some(message) }
    }
}

/// Everything the page needs to build its controls
#[derive(Serialize)]
struct MetaPayload {
    keys: Vec<String>,
    modes: Vec<String>,
    genres: Vec<GenreOption>,
    categories: Vec<&'static str>,
    summary: SummaryPayload,
}

#[derive(Serialize)]
struct GenreOption {
    value: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct SummaryPayload {
    tracks: usize,
    rows_read: usize,
    rows_dropped: usize,
    cutoffs: StreamCutoffs,
    /// Least / Middle / Top counts
    category_counts: [usize; 3],
}

fn meta_payload(dataset: &Dataset) -> MetaPayload {
    MetaPayload {
        keys: dataset.keys(),
        modes: dataset.modes(),
        genres: charts::GENRE_FIELDS
            .iter()
            .map(|&field| GenreOption { value: field, label: charts::genre_label(field) })
            .collect(),
        categories: StreamCategory::ALL.iter().map(|c| c.label()).collect(),
        summary: SummaryPayload {
            tracks: dataset.len(),
            rows_read: dataset.load_stats.rows_read,
            rows_dropped: dataset.load_stats.rows_dropped,
            cutoffs: dataset.cutoffs,
            category_counts: dataset.category_counts(),
        },
    }
}

/// Load the dataset, start the server, open the browser, serve the UI
pub fn start(port: u16, csv_path: PathBuf) -> io::Result<()> {
    let dataset = Dataset::load(&csv_path)?;

    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr).map_err(|e| {
        io::Error::new(io::ErrorKind::Other, e.to_string())
    })?;

    let url = format!("http://localhost:{}", port);
    let source = csv_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| csv_path.display().to_string());
    let page = UI_HTML.replace("{{SOURCE}}", &source);

    eprintln!("\n\x1b[1;32m🎧 Trackboard\x1b[0m");
    eprintln!("   {}", url);
    eprintln!("   Source: {} ({} tracks)", source, dataset.len());
    if dataset.load_stats.rows_dropped > 0 {
        eprintln!(
            "   \x1b[33mWARN\x1b[0m {} row(s) dropped during load",
            dataset.load_stats.rows_dropped
        );
    }
    eprintln!();

    // Open browser
    let _ = open::that(&url);

    // Handle requests
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(&dataset, &page, request) {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

fn handle_request(dataset: &Dataset, page: &str, request: Request) -> io::Result<()> {
    let url = request.url().to_string();
    let mut parts = url.splitn(2, '?');
    let path = parts.next().unwrap_or("/").to_string();
    let query = parts.next().unwrap_or("").to_string();
    let method = request.method().clone();

    match (&method, path.as_str()) {
        // Serve embedded UI
        (&Method::Get, "/") => {
            let response = Response::from_string(page)
                .with_header(Header::from_bytes(&b"Content-Type"[..], &b"text/html"[..]).unwrap());
            request.respond(response)
        }

        // API: control options and dataset summary
        (&Method::Get, "/api/meta") => {
            let body = serde_json::to_string(&ApiResponse::success(meta_payload(dataset)))?;
            respond_json(request, body)
        }

        // API: one chart, selected by slug, configured by query string
        (&Method::Get, p) if p.starts_with(CHART_ROUTE) => {
            let slug = &p[CHART_ROUTE.len()..];
            match charts::find(slug) {
                Some(chart) => {
                    let figure = (chart.handler)(dataset, &query);
                    let body = serde_json::to_string(&ApiResponse::success(figure))?;
                    respond_json(request, body)
                }
                None => {
                    let body = serde_json::to_string(&ApiResponse::<()>::failure(format!(
                        "unknown chart: {}",
                        slug
                    )))?;
                    let response = Response::from_string(body)
                        .with_status_code(404)
                        .with_header(
                            Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                                .unwrap(),
                        );
                    request.respond(response)
                }
            }
        }

        // 404
        _ => {
            let response = Response::from_string("Not found").with_status_code(404);
            request.respond(response)
        }
    }
}

fn respond_json(request: Request, body: String) -> io::Result<()> {
    let response = Response::from_string(body)
        .with_header(Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap());
    request.respond(response)
}
