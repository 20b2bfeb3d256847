// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Form, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use headcount_api::{
    ApiError, AreaListing, CorrectSnapshotRequest, CorrectSnapshotResponse, SubmitSnapshotRequest,
    SubmitSnapshotResponse, area_history, correct_snapshot, export_csv, submit_snapshot,
};
use headcount_domain::{DisplayTimezone, FIELD_DECIBELS, FIELD_LAPTOPS, SchemaGeneration};
use headcount_persistence::Persistence;

/// Headcount Server - HTTP server for the headcount occupancy tracker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Schema generation for submitted counts (people, seating, or breakdown)
    #[arg(short, long, default_value = "breakdown")]
    schema: String,

    /// IANA timezone used when rendering timestamps
    #[arg(long, default_value = "America/New_York")]
    display_timezone: String,
}

/// Application state shared across handlers.
///
/// The store is wrapped in a Mutex to allow safe concurrent access; the
/// generation and timezone are fixed at startup.
#[derive(Clone)]
struct AppState {
    /// The snapshot store.
    store: Arc<Mutex<Persistence>>,
    /// The schema generation submissions are validated against.
    generation: SchemaGeneration,
    /// The timezone timestamps are rendered in.
    timezone: DisplayTimezone,
}

/// Query parameters for the root view.
#[derive(Debug, Clone, Deserialize)]
struct RootQuery {
    /// The area to open the submission form for.
    area: Option<String>,
    /// The floor to center the map view on.
    floor: Option<String>,
}

/// Query parameters for the history view.
#[derive(Debug, Clone, Deserialize)]
struct HistoryQuery {
    /// The area to list history for.
    area: Option<String>,
}

/// View context for the submission form.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SubmissionFormContext {
    /// The area being submitted for.
    area: String,
    /// The input fields the form should render, in display order.
    fields: Vec<String>,
}

/// View context for the area map.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapViewContext {
    /// The floor to display, `"1"` or `"2"`.
    floor: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::ValidationFailed { .. } | ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::PersistenceFailed { .. } | ApiError::Internal { .. } => {
                error!(error = %err, "Snapshot operation failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Parses the floor query parameter, defaulting to the first floor.
fn parse_floor(floor: Option<&str>) -> Result<String, HttpError> {
    match floor {
        None => Ok(String::from("1")),
        Some("1") => Ok(String::from("1")),
        Some("2") => Ok(String::from("2")),
        Some(other) => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid floor: '{other}'. Must be '1' or '2'"),
        }),
    }
}

/// The input fields the submission form renders for a generation.
///
/// Required count fields first, then the optional readings.
fn submission_fields(generation: SchemaGeneration) -> Vec<String> {
    let mut fields: Vec<String> = generation
        .required_fields()
        .iter()
        .map(|&field| String::from(field))
        .collect();
    fields.push(String::from(FIELD_DECIBELS));
    if generation == SchemaGeneration::Breakdown {
        fields.push(String::from(FIELD_LAPTOPS));
    }
    fields
}

/// Handler for GET / endpoint.
///
/// With an `area` query parameter this serves the submission form context;
/// without one it serves the map view context.
async fn handle_root_get(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RootQuery>,
) -> Result<Response, HttpError> {
    if let Some(area) = query.area {
        return Ok(Json(SubmissionFormContext {
            area,
            fields: submission_fields(app_state.generation),
        })
        .into_response());
    }

    let floor: String = parse_floor(query.floor.as_deref())?;
    Ok(Json(MapViewContext { floor }).into_response())
}

/// Handler for POST / endpoint.
///
/// Records a snapshot from submitted form fields, then falls through to the
/// map view. Areas named with a leading 'U' sit upstairs, so the map opens
/// on the second floor for them.
async fn handle_root_post(
    AxumState(app_state): AxumState<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Json<MapViewContext>, HttpError> {
    let area: String = fields.get("area").cloned().unwrap_or_default();
    let request: SubmitSnapshotRequest = SubmitSnapshotRequest { area, fields };

    let mut store = app_state.store.lock().await;
    let response: SubmitSnapshotResponse =
        submit_snapshot(&mut *store, app_state.generation, &request)?;
    drop(store);

    info!(key = response.key, area = %response.area, "Recorded snapshot");

    let floor: &str = if response.area.starts_with('U') {
        "2"
    } else {
        "1"
    };
    Ok(Json(MapViewContext {
        floor: String::from(floor),
    }))
}

/// Handler for GET /history endpoint.
///
/// Lists an area's snapshots, newest first, with display-adjusted
/// timestamps.
async fn handle_history_get(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<AreaListing>, HttpError> {
    let Some(area) = query.area else {
        return Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: String::from("Missing required query parameter: area"),
        });
    };

    let mut store = app_state.store.lock().await;
    let listing: AreaListing = area_history(&mut *store, &area, &app_state.timezone)?;
    drop(store);

    Ok(Json(listing))
}

/// Handler for POST /history endpoint.
///
/// Corrects a previously recorded snapshot in place from submitted form
/// fields.
async fn handle_history_post(
    AxumState(app_state): AxumState<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Json<CorrectSnapshotResponse>, HttpError> {
    let area: String = fields.get("area").cloned().unwrap_or_default();
    let request: CorrectSnapshotRequest = CorrectSnapshotRequest { area, fields };

    let mut store = app_state.store.lock().await;
    let response: CorrectSnapshotResponse =
        correct_snapshot(&mut *store, app_state.generation, &request)?;
    drop(store);

    info!(key = response.key, area = %response.area, "Corrected snapshot");

    Ok(Json(response))
}

/// Handler for GET /csv endpoint.
///
/// Serves every area's history as a CSV attachment.
async fn handle_csv_get(AxumState(app_state): AxumState<AppState>) -> Result<Response, HttpError> {
    let mut store = app_state.store.lock().await;
    let document: String = export_csv(&mut *store, &app_state.timezone)?;
    drop(store);

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"snapshots.csv\"",
        ),
    ];
    Ok((headers, document).into_response())
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root_get).post(handle_root_post))
        .route("/history", get(handle_history_get).post(handle_history_post))
        .route("/csv", get(handle_csv_get))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing headcount server");

    let generation: SchemaGeneration = args.schema.parse()?;
    info!(generation = generation.as_str(), "Using schema generation");

    let timezone: DisplayTimezone = DisplayTimezone::new(&args.display_timezone);
    if !timezone.is_recognized() {
        warn!(
            zone = %args.display_timezone,
            "Display timezone not recognized, timestamps stay in UTC"
        );
    }

    // Initialize the store (in-memory or file-based based on CLI argument)
    let store: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        store: Arc::new(Mutex::new(store)),
        generation,
        timezone,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
