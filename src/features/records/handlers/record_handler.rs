use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    response::{Html, IntoResponse, Response},
};
use minijinja::context;
use serde::Serialize;

use crate::core::error::{AppError, Result};
use crate::features::identity::model::AuthenticatedUser;
use crate::features::records::export;
use crate::features::records::filter::{filter_rows, RecordQuery};
use crate::features::records::routes::RecordsState;
use crate::features::records::schema::{self, ColumnKind, RecordSchema};
use crate::shared::constants::NO_PHOTO;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

#[derive(Serialize)]
struct TabView {
    title: &'static str,
    href: String,
    active: bool,
}

#[derive(Serialize)]
struct ColumnView {
    header: &'static str,
    kind: &'static str,
}

#[derive(Serialize)]
struct RowView {
    id: String,
    cells: Vec<String>,
}

fn tabs_for(active: &RecordSchema) -> Vec<TabView> {
    schema::ALL
        .iter()
        .map(|s| TabView {
            title: s.title,
            href: format!("/dashboard/{}", s.slug),
            active: s.slug == active.slug,
        })
        .collect()
}

fn resolve_schema(slug: &str) -> Result<&'static RecordSchema> {
    schema::by_slug(slug)
        .ok_or_else(|| AppError::NotFound(format!("no record table at '{}'", slug)))
}

/// Render the record table for the filtered working set
pub async fn show_table(
    user: AuthenticatedUser,
    State(state): State<RecordsState>,
    Path(slug): Path<String>,
    Query(query): Query<RecordQuery>,
) -> Result<Html<String>> {
    let schema = resolve_schema(&slug)?;

    let rows = state.records.working_set(schema).await?;
    let filtered = filter_rows(schema, &rows, &query);

    tracing::debug!(
        "Rendering {}/{} '{}' records for {}",
        filtered.len(),
        rows.len(),
        schema.slug,
        user.email
    );

    let columns: Vec<ColumnView> = schema
        .columns
        .iter()
        .map(|c| ColumnView {
            header: c.header,
            kind: match c.kind {
                ColumnKind::Text => "text",
                ColumnKind::Photo => "photo",
            },
        })
        .collect();

    let row_views: Vec<RowView> = filtered
        .iter()
        .map(|r| RowView {
            id: r.id.clone(),
            cells: r.cells.clone(),
        })
        .collect();

    let html = state.templates.render(
        "records.html",
        context! {
            title => schema.title,
            heading => schema.heading,
            tabs => tabs_for(schema),
            search_placeholder => schema.search_placeholder,
            q => query.q,
            fecha => query.fecha,
            export_href => format!("/dashboard/{}/export", schema.slug),
            columns => columns,
            rows => row_views,
            no_photo => NO_PHOTO,
        },
    )?;

    Ok(Html(html))
}

/// Download the currently filtered rows as a spreadsheet
pub async fn export_table(
    _user: AuthenticatedUser,
    State(state): State<RecordsState>,
    Path(slug): Path<String>,
    Query(query): Query<RecordQuery>,
) -> Result<Response> {
    let schema = resolve_schema(&slug)?;

    let rows = state.records.working_set(schema).await?;
    let filtered = filter_rows(schema, &rows, &query);

    let bytes = export::write_workbook(schema, &filtered)?;

    tracing::info!(
        "Exported {} '{}' records to {}",
        filtered.len(),
        schema.slug,
        schema.export_filename
    );

    let disposition = format!("attachment; filename=\"{}\"", schema.export_filename);
    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static(XLSX_CONTENT_TYPE),
        ),
        (
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&disposition)
                .map_err(|e| AppError::Internal(format!("Invalid filename header: {}", e)))?,
        ),
    ];

    Ok((headers, bytes).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::records::routes;
    use crate::features::records::services::RecordService;
    use crate::modules::store::DocumentStore;
    use crate::shared::templates::TemplateEngine;
    use crate::shared::test_helpers::{doc, with_session, FailingStore, StubStore};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::json;
    use std::sync::Arc;

    fn records_server(store: impl DocumentStore + 'static) -> TestServer {
        let records = Arc::new(RecordService::new(Arc::new(store)));
        let templates = Arc::new(TemplateEngine::new().unwrap());
        TestServer::new(with_session(routes::routes(records, templates))).unwrap()
    }

    fn vales_store() -> StubStore {
        StubStore {
            documents: vec![
                doc(
                    "v1",
                    json!({
                        "fecha": "2024-05-03",
                        "seguro": "Qualitas",
                        "municipio": "Atizapán",
                        "marca": "Nissan",
                        "placas": "ABC-12-34",
                        "fotos": ["https://img.example.com/1.jpg"]
                    }),
                ),
                doc(
                    "v2",
                    json!({
                        "fecha": "2024-06-01",
                        "municipio": "Naucalpan",
                        "marca": "Ford",
                        "placas": "XYZ-98-76"
                    }),
                ),
            ],
        }
    }

    #[tokio::test]
    async fn table_renders_rows_thumbnails_and_placeholder() {
        let server = records_server(vales_store());

        let response = server.get("/dashboard/vales").await;

        response.assert_status_ok();
        let body = response.text();
        assert!(body.contains("Vales Registrados"));
        assert!(body.contains("Atizapán"));
        assert!(body.contains("Naucalpan"));
        // v1 has one photo; the second slot and both of v2's render the literal
        assert!(body.contains("https://img.example.com/1.jpg"));
        assert_eq!(body.matches(NO_PHOTO).count(), 3);
    }

    #[tokio::test]
    async fn text_filter_narrows_the_table() {
        let server = records_server(vales_store());

        let response = server
            .get("/dashboard/vales")
            .add_query_param("q", "atiza")
            .await;

        response.assert_status_ok();
        let body = response.text();
        assert!(body.contains("Atizapán"));
        assert!(!body.contains("Naucalpan"));
    }

    #[tokio::test]
    async fn date_filter_narrows_the_table() {
        let server = records_server(vales_store());

        let response = server
            .get("/dashboard/vales")
            .add_query_param("fecha", "2024-06")
            .await;

        response.assert_status_ok();
        let body = response.text();
        assert!(body.contains("Naucalpan"));
        assert!(!body.contains("Atizapán"));
    }

    #[tokio::test]
    async fn active_tab_is_highlighted() {
        let server = records_server(vales_store());

        let body = server.get("/dashboard/corralon").await.text();

        assert!(body.contains("Corralón Registrado"));
        assert!(body.contains("/dashboard/vales"));
        assert!(body.contains("/dashboard/entregas"));
    }

    #[tokio::test]
    async fn unknown_slug_is_not_found() {
        let server = records_server(vales_store());

        let response = server.get("/dashboard/desconocido").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn store_failure_renders_an_error_not_an_empty_table() {
        let server = records_server(FailingStore);

        let response = server.get("/dashboard/vales").await;

        response.assert_status(StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn export_downloads_a_workbook_with_fixed_filename() {
        let server = records_server(vales_store());

        let response = server.get("/dashboard/vales/export").await;

        response.assert_status_ok();
        assert_eq!(response.header("content-type"), XLSX_CONTENT_TYPE);
        assert_eq!(
            response.header("content-disposition"),
            "attachment; filename=\"vales.xlsx\""
        );
        assert!(response.as_bytes().starts_with(b"PK"));
    }

    #[tokio::test]
    async fn export_respects_the_current_filter() {
        let server = records_server(vales_store());

        let full = server.get("/dashboard/vales/export").await;
        let narrowed = server
            .get("/dashboard/vales/export")
            .add_query_param("q", "atiza")
            .await;

        full.assert_status_ok();
        narrowed.assert_status_ok();
        // Both are valid workbooks; the narrowed one carries fewer rows and
        // so differs from the full export
        assert_ne!(full.as_bytes(), narrowed.as_bytes());
    }
}
