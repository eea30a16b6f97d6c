use crate::services::ledger::{EditOutcome, SalesLedger};
use crate::views::{LedgerView, RowView, TotalsView};
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use service_core::error::AppError;
use tower_sessions::Session;

/// Session key the ledger is stored under.
pub const LEDGER_SESSION_KEY: &str = "sales_ledger";

#[derive(Template)]
#[template(path = "ledger.html")]
pub struct LedgerPageTemplate {
    pub rows: Vec<RowView>,
    pub totals: TotalsView,
}

impl From<LedgerView> for LedgerPageTemplate {
    fn from(view: LedgerView) -> Self {
        Self {
            rows: view.rows,
            totals: view.totals,
        }
    }
}

/// Out-of-band replacements for the units-sold and revenue cells of some rows.
#[derive(Template)]
#[template(path = "partials/derived_cells.html")]
pub struct DerivedCellsTemplate {
    pub rows: Vec<RowView>,
}

/// Every row's derived cells plus both aggregate displays.
#[derive(Template)]
#[template(path = "partials/save_result.html")]
pub struct SaveResultTemplate {
    pub rows: Vec<RowView>,
    pub totals: TotalsView,
}

/// Raw values as posted by an editable cell. Missing keys arrive as empty
/// strings and go through the same defaulting as malformed ones.
#[derive(Debug, Deserialize)]
pub struct FieldEditRequest {
    #[serde(default)]
    pub index: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: String,
}

fn session_error(err: tower_sessions::session::Error) -> AppError {
    AppError::SessionError(anyhow::Error::new(err))
}

async fn load_ledger(session: &Session) -> Result<Option<SalesLedger>, AppError> {
    session
        .get::<SalesLedger>(LEDGER_SESSION_KEY)
        .await
        .map_err(session_error)
}

async fn store_ledger(session: &Session, ledger: &SalesLedger) -> Result<(), AppError> {
    session
        .insert(LEDGER_SESSION_KEY, ledger)
        .await
        .map_err(session_error)
}

fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == "true")
}

/// Page load: a fresh ledger for this session, rendered in full.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
) -> Result<LedgerPageTemplate, AppError> {
    let ledger = SalesLedger::initialize(&state.catalog);
    store_ledger(&session, &ledger).await?;

    tracing::info!(items = ledger.records().len(), "Initialized sales ledger");

    Ok(LedgerView::build(&ledger).into())
}

/// One editable cell changed. Responds with the row's refreshed derived cells
/// when the edit recomputed it, otherwise with 204 so nothing is swapped.
pub async fn edit_field(
    session: Session,
    Form(payload): Form<FieldEditRequest>,
) -> Result<Response, AppError> {
    let Some(mut ledger) = load_ledger(&session).await? else {
        tracing::warn!(
            index = %payload.index,
            field = %payload.field,
            "Edit received without an initialized ledger"
        );
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let outcome = ledger.on_field_edited(&payload.index, &payload.field, &payload.value);

    match outcome {
        EditOutcome::Ignored => Ok(StatusCode::NO_CONTENT.into_response()),
        EditOutcome::Committed { .. } => {
            store_ledger(&session, &ledger).await?;
            Ok(StatusCode::NO_CONTENT.into_response())
        }
        EditOutcome::Recomputed { position } => {
            store_ledger(&session, &ledger).await?;
            let row = RowView::new(position, &ledger.records()[position]);
            Ok(DerivedCellsTemplate { rows: vec![row] }.into_response())
        }
    }
}

/// Form submission. htmx requests get out-of-band fragments; a plain form post
/// gets the whole page back.
pub async fn save(session: Session, headers: HeaderMap) -> Result<Response, AppError> {
    let Some(mut ledger) = load_ledger(&session).await? else {
        tracing::warn!("Save received without an initialized ledger");
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    ledger.save();
    store_ledger(&session, &ledger).await?;

    let view = LedgerView::build(&ledger);
    if is_htmx(&headers) {
        Ok(SaveResultTemplate {
            rows: view.rows,
            totals: view.totals,
        }
        .into_response())
    } else {
        Ok(LedgerPageTemplate::from(view).into_response())
    }
}
