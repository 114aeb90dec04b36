use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use crate::books::dto::{BookList, BookUpdate};
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::catalog_stats_cmd::{CatalogStatsCommand, CatalogStatsCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest, GetBookCommandResponse};
use crate::catalog::command::import_books_cmd::{ImportBooksCommand, ImportBooksCommandRequest, ImportBooksCommandResponse};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::lookup_book_cmd::{LookupBookCommand, LookupBookCommandRequest, LookupBookCommandResponse};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest, RemoveBookCommandResponse};
use crate::catalog::command::search_books_cmd::{SearchBooksCommand, SearchBooksCommandRequest};
use crate::catalog::command::update_book_cmd::{UpdateBookCommand, UpdateBookCommandRequest, UpdateBookCommandResponse};
use crate::catalog::store::CatalogStats;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, MessageResponse, ServerError};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/books", post(add_book).get(list_books))
        .route("/books/import", post(import_books))
        .route("/books/search/:keyword", get(search_books))
        .route("/books/:isbn",
               get(find_book_by_isbn).put(update_book).delete(remove_book))
        .route("/stats", get(catalog_stats))
        .route("/lookup/:isbn", get(lookup_book))
        .with_state(state)
}

pub(crate) async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse::ok("Welcome to the bookshelf catalog API"))
}

pub(crate) async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::ok("ok"))
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    body: Bytes) -> Result<(StatusCode, Json<AddBookCommandResponse>), ServerError> {
    let req: AddBookCommandRequest = serde_json::from_slice(&body).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(state.catalog_service).execute(req).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub(crate) async fn list_books(
    State(state): State<AppState>) -> Result<Json<BookList>, ServerError> {
    let res = ListBooksCommand::new(state.catalog_service).execute(ListBooksCommandRequest::default()).await?;
    Ok(Json(res))
}

pub(crate) async fn search_books(
    State(state): State<AppState>,
    Path(keyword): Path<String>) -> Result<Json<BookList>, ServerError> {
    let req = SearchBooksCommandRequest::new(keyword.as_str());
    let res = SearchBooksCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<GetBookCommandResponse>, ServerError> {
    let req = GetBookCommandRequest::new(isbn);
    let res = GetBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn update_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>,
    body: Bytes) -> Result<Json<UpdateBookCommandResponse>, ServerError> {
    let patch: BookUpdate = serde_json::from_slice(&body).map_err(json_to_server_error)?;
    let req = UpdateBookCommandRequest::new(isbn.as_str(), patch);
    let res = UpdateBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn remove_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<RemoveBookCommandResponse>, ServerError> {
    let req = RemoveBookCommandRequest::new(isbn);
    let res = RemoveBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn catalog_stats(
    State(state): State<AppState>) -> Result<Json<CatalogStats>, ServerError> {
    let res = CatalogStatsCommand::new(state.catalog_service).execute(CatalogStatsCommandRequest::default()).await?;
    Ok(Json(res))
}

pub(crate) async fn lookup_book(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<LookupBookCommandResponse>, ServerError> {
    let req = LookupBookCommandRequest::new(isbn.as_str());
    let res = LookupBookCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn import_books(
    State(state): State<AppState>,
    body: Bytes) -> Result<Json<ImportBooksCommandResponse>, ServerError> {
    let req: ImportBooksCommandRequest = serde_json::from_slice(&body).map_err(json_to_server_error)?;
    let res = ImportBooksCommand::new(state.catalog_service).execute(req).await?;
    Ok(Json(res))
}
