use crate::errors::AppError;
use crate::models::{LedgerView, MutationResponse, QuantityForm, QuantityRequest, Summary};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
    Form, Json,
};
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let ledger = state.ledger.lock().await;
    Html(render_index(&ledger.view()))
}

pub async fn list_records(State(state): State<AppState>) -> Json<LedgerView> {
    let ledger = state.ledger.lock().await;
    Json(ledger.view())
}

pub async fn get_summary(State(state): State<AppState>) -> Json<Summary> {
    let ledger = state.ledger.lock().await;
    Json(ledger.summary())
}

pub async fn add_record(
    State(state): State<AppState>,
    Json(payload): Json<QuantityRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    let mut ledger = state.ledger.lock().await;
    let record = ledger.add(payload.quantity)?;
    info!("recorded day {} with {} eggs", record.day, record.quantity);

    Ok(Json(MutationResponse {
        message: "Dia adicionado com sucesso!".to_string(),
        view: ledger.view(),
    }))
}

pub async fn add_form(
    State(state): State<AppState>,
    Form(form): Form<QuantityForm>,
) -> Redirect {
    let mut ledger = state.ledger.lock().await;
    if let Err(err) = ledger.add(form.quantity) {
        warn!("form submission not recorded: {err}");
    }
    Redirect::to("/")
}

pub async fn edit_record(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(payload): Json<QuantityRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    let mut ledger = state.ledger.lock().await;
    ledger.edit(index, payload.quantity)?;

    Ok(Json(MutationResponse {
        message: "Quantidade atualizada!".to_string(),
        view: ledger.view(),
    }))
}

pub async fn remove_record(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<MutationResponse>, AppError> {
    let mut ledger = state.ledger.lock().await;
    let removed = ledger.remove(index)?;
    info!("removed day {}", removed.day);

    Ok(Json(MutationResponse {
        message: "Dia removido com sucesso!".to_string(),
        view: ledger.view(),
    }))
}

pub async fn clear_records(
    State(state): State<AppState>,
) -> Result<Json<MutationResponse>, AppError> {
    let mut ledger = state.ledger.lock().await;
    ledger.clear()?;
    info!("cleared all harvest records");

    Ok(Json(MutationResponse {
        message: "Todos os dados foram limpos!".to_string(),
        view: ledger.view(),
    }))
}

pub async fn export_report(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let ledger = state.ledger.lock().await;
    let report = ledger.export_report()?;
    let disposition = format!("attachment; filename=\"{}\"", ledger.export_filename());

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report,
    ))
}
