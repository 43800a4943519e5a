//! Transaction endpoints.

use api_types::transaction::{
    TransactionListParams, TransactionListResponse, TransactionNew, TransactionUpdate,
    TransactionView,
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use engine::{
    CreateTransactionCmd, DeleteTransactionCmd, GetTransactionQuery, ListTransactionsQuery,
    TokenIdentity, TransactionListFilter, TransactionRecord, UpdateTransactionCmd,
};

use crate::{ServerError, kind_to_api, kind_to_engine, server::ServerState};

fn view(record: TransactionRecord) -> TransactionView {
    TransactionView {
        id: record.id,
        amount_minor: record.amount_minor,
        kind: kind_to_api(record.kind),
        category_id: record.category_id,
        category_name: record.category_name,
        description: record.description,
        occurred_on: record.occurred_on,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

pub async fn create(
    Extension(identity): Extension<TokenIdentity>,
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let mut cmd = CreateTransactionCmd::new(
        identity.user_id,
        payload.amount_minor,
        kind_to_engine(payload.kind),
        payload.occurred_on,
    );
    cmd.category_id = payload.category_id;
    cmd.description = payload.description;

    let record = state.engine.create_transaction(cmd).await?;
    Ok((StatusCode::CREATED, Json(view(record))))
}

pub async fn list(
    Extension(identity): Extension<TokenIdentity>,
    State(state): State<ServerState>,
    Query(params): Query<TransactionListParams>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let filter = TransactionListFilter {
        month: params.month,
        year: params.year,
        category_id: params.category_id,
    };

    let records = state
        .engine
        .list_transactions(ListTransactionsQuery::new(identity.user_id).filter(filter))
        .await?;

    Ok(Json(TransactionListResponse {
        transactions: records.into_iter().map(view).collect(),
    }))
}

pub async fn get(
    Extension(identity): Extension<TokenIdentity>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransactionView>, ServerError> {
    let record = state
        .engine
        .transaction(GetTransactionQuery::new(id, identity.user_id))
        .await?;
    Ok(Json(view(record)))
}

pub async fn update(
    Extension(identity): Extension<TokenIdentity>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionUpdate>,
) -> Result<Json<TransactionView>, ServerError> {
    let mut cmd = UpdateTransactionCmd::new(
        id,
        identity.user_id,
        payload.amount_minor,
        kind_to_engine(payload.kind),
        payload.occurred_on,
    );
    cmd.category_id = payload.category_id;
    cmd.description = payload.description;

    let record = state.engine.update_transaction(cmd).await?;
    Ok(Json(view(record)))
}

pub async fn remove(
    Extension(identity): Extension<TokenIdentity>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_transaction(DeleteTransactionCmd::new(id, identity.user_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
