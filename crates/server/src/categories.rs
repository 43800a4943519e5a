//! Category endpoints.

use api_types::category::{CategoriesResponse, CategoryNew, CategoryUpdate, CategoryView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use engine::{
    CategoryRecord, CreateCategoryCmd, DeleteCategoryCmd, GetCategoryQuery, ListCategoriesQuery,
    TokenIdentity, UpdateCategoryCmd,
};

use crate::{ServerError, kind_to_api, kind_to_engine, server::ServerState};

fn view(record: CategoryRecord) -> CategoryView {
    CategoryView {
        id: record.id,
        name: record.name,
        kind: kind_to_api(record.kind),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

pub async fn create(
    Extension(identity): Extension<TokenIdentity>,
    State(state): State<ServerState>,
    Json(payload): Json<CategoryNew>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let record = state
        .engine
        .create_category(CreateCategoryCmd::new(
            identity.user_id,
            payload.name,
            kind_to_engine(payload.kind),
        ))
        .await?;

    Ok((StatusCode::CREATED, Json(view(record))))
}

pub async fn list(
    Extension(identity): Extension<TokenIdentity>,
    State(state): State<ServerState>,
) -> Result<Json<CategoriesResponse>, ServerError> {
    let records = state
        .engine
        .list_categories(ListCategoriesQuery::new(identity.user_id))
        .await?;

    Ok(Json(CategoriesResponse {
        categories: records.into_iter().map(view).collect(),
    }))
}

pub async fn get(
    Extension(identity): Extension<TokenIdentity>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CategoryView>, ServerError> {
    let record = state
        .engine
        .category(GetCategoryQuery::new(id, identity.user_id))
        .await?;
    Ok(Json(view(record)))
}

pub async fn update(
    Extension(identity): Extension<TokenIdentity>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryUpdate>,
) -> Result<Json<CategoryView>, ServerError> {
    let record = state
        .engine
        .update_category(UpdateCategoryCmd::new(
            id,
            identity.user_id,
            payload.name,
            kind_to_engine(payload.kind),
        ))
        .await?;
    Ok(Json(view(record)))
}

pub async fn remove(
    Extension(identity): Extension<TokenIdentity>,
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_category(DeleteCategoryCmd::new(id, identity.user_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
