use super::database::*;
use super::error::{CatalogError, CatalogResult};
use super::model::NameForm;
use super::render::render;
use super::server::AppState;
use axum::extract::{Form, Path, State};
use axum::response::{Html, Redirect};
use serde_json::json;

fn not_found() -> CatalogError {
    CatalogError::NotFound(String::from("Publisher not found"))
}

fn already_exists() -> CatalogError {
    CatalogError::Conflict(String::from("Publisher already exists"))
}

pub async fn list(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    log::debug!("publishers::list()");
    let publishers = find_publishers(&state.pool).await?;
    render(
        &state.handlebars,
        "publishers",
        &json!({ "publishers": publishers }),
    )
}

pub async fn new(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    log::debug!("publishers::new()");
    render(
        &state.handlebars,
        "publisher-form",
        &json!({ "heading": "Nouvel éditeur", "action": "/publishers" }),
    )
}

pub async fn create(
    State(state): State<AppState>,
    Form(name_form): Form<NameForm>,
) -> CatalogResult<Redirect> {
    log::debug!("publishers::create({})", &name_form.name);
    if find_publisher_by_name(&state.pool, &name_form.name)
        .await?
        .is_some()
    {
        return Err(already_exists());
    }
    let id = create_publisher(&state.pool, &name_form.name).await?;
    log::info!("Created publisher {} with id {}", &name_form.name, id);
    Ok(Redirect::to("/publishers"))
}

pub async fn games(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> CatalogResult<Html<String>> {
    log::debug!("publishers::games({})", id);
    let publisher = find_publisher_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    let games = find_games_by_publisher_id(&state.pool, id).await?;
    render(
        &state.handlebars,
        "games",
        &json!({
            "heading": format!("Jeux de l'éditeur {}", publisher.name),
            "games": games,
        }),
    )
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> CatalogResult<Html<String>> {
    log::debug!("publishers::edit({})", id);
    let publisher = find_publisher_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    render(
        &state.handlebars,
        "publisher-form",
        &json!({
            "heading": format!("Modifier {}", publisher.name),
            "action": format!("/publishers/{}/edit", id),
            "publisher": publisher,
        }),
    )
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(name_form): Form<NameForm>,
) -> CatalogResult<Redirect> {
    log::debug!("publishers::update({}, {})", id, &name_form.name);
    if let Some(publisher) = find_publisher_by_name(&state.pool, &name_form.name).await? {
        if publisher.id != id {
            return Err(already_exists());
        }
    }
    if update_publisher(&state.pool, id, &name_form.name).await? == 0 {
        return Err(not_found());
    }
    log::info!("Renamed publisher {} to {}", id, &name_form.name);
    Ok(Redirect::to("/publishers"))
}

/// Deletes the publisher along with all of its games, atomically.
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> CatalogResult<Redirect> {
    log::debug!("publishers::delete({})", id);
    let mut transaction = begin_transaction(&state.pool).await?;
    if find_publisher_by_id(&mut *transaction, id).await?.is_none() {
        return Err(not_found());
    }
    let deleted_games = delete_games_by_publisher_id(&mut *transaction, id).await?;
    delete_publisher_by_id(&mut *transaction, id).await?;
    commit_transaction(transaction).await?;
    log::info!(
        "Deleted publisher with id {} and {} game(s)",
        id,
        deleted_games
    );
    Ok(Redirect::to("/publishers"))
}
