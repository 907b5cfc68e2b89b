use super::database::*;
use super::error::{CatalogError, CatalogResult, is_foreign_key_violation};
use super::model::NameForm;
use super::render::render;
use super::server::AppState;
use axum::extract::{Form, Path, State};
use axum::response::{Html, Redirect};
use serde_json::json;

fn not_found() -> CatalogError {
    CatalogError::NotFound(String::from("Genre not found"))
}

fn still_used() -> CatalogError {
    CatalogError::Conflict(String::from("Genre is still used by games"))
}

/// A game inserted after the usage check makes the store refuse the deletion.
pub fn deletion_error(error: sqlx::Error) -> CatalogError {
    if is_foreign_key_violation(&error) {
        still_used()
    } else {
        CatalogError::from(error)
    }
}

pub async fn list(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    log::debug!("genres::list()");
    let genres = find_genres(&state.pool).await?;
    render(&state.handlebars, "genres", &json!({ "genres": genres }))
}

pub async fn new(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    log::debug!("genres::new()");
    render(&state.handlebars, "genre-form", &json!({}))
}

pub async fn create(
    State(state): State<AppState>,
    Form(name_form): Form<NameForm>,
) -> CatalogResult<Redirect> {
    log::debug!("genres::create({})", &name_form.name);
    if find_genre_by_name(&state.pool, &name_form.name)
        .await?
        .is_some()
    {
        return Err(CatalogError::Conflict(String::from("Genre already exists")));
    }
    let id = create_genre(&state.pool, &name_form.name).await?;
    log::info!("Created genre {} with id {}", &name_form.name, id);
    Ok(Redirect::to("/games/new"))
}

pub async fn games(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> CatalogResult<Html<String>> {
    log::debug!("genres::games({})", id);
    let genre = find_genre_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    let games = find_games_by_genre_id(&state.pool, id).await?;
    render(
        &state.handlebars,
        "games",
        &json!({
            "heading": format!("Jeux du genre {}", genre.name),
            "games": games,
        }),
    )
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> CatalogResult<Redirect> {
    log::debug!("genres::delete({})", id);
    if count_games_by_genre_id(&state.pool, id).await? > 0 {
        return Err(still_used());
    }
    if delete_genre_by_id(&state.pool, id)
        .await
        .map_err(deletion_error)?
        == 0
    {
        return Err(not_found());
    }
    log::info!("Deleted genre with id {}", id);
    Ok(Redirect::to("/genres"))
}

#[cfg(test)]
mod test_deletion_error;
