use super::database::*;
use super::error::{CatalogError, CatalogResult};
use super::model::*;
use super::render::render;
use super::server::AppState;
use axum::extract::{Form, Path, State};
use axum::response::{Html, Redirect};
use serde_json::json;
use sqlx::sqlite::SqlitePool;

fn not_found() -> CatalogError {
    CatalogError::NotFound(String::from("Game not found"))
}

fn parse_game_form(game_form: &GameForm) -> CatalogResult<GameInput> {
    GameInput::try_from(game_form).map_err(|error| CatalogError::BadRequest(error.to_string()))
}

async fn check_references(pool: &SqlitePool, game_input: &GameInput) -> CatalogResult<()> {
    if find_genre_by_id(pool, game_input.genre_id).await?.is_none()
        || find_publisher_by_id(pool, game_input.publisher_id)
            .await?
            .is_none()
    {
        return Err(CatalogError::BadRequest(String::from(
            "Unknown genre or publisher",
        )));
    }
    Ok(())
}

pub async fn featured(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    log::debug!("games::featured()");
    let games = find_featured_games(&state.pool).await?;
    render(&state.handlebars, "index", &json!({ "games": games }))
}

pub async fn list(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    log::debug!("games::list()");
    let games = find_games(&state.pool).await?;
    render(
        &state.handlebars,
        "games",
        &json!({ "heading": "Tous les jeux", "games": games }),
    )
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> CatalogResult<Html<String>> {
    log::debug!("games::show({})", id);
    let game = find_game_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    render(&state.handlebars, "game", &json!({ "game": game }))
}

pub async fn new(State(state): State<AppState>) -> CatalogResult<Html<String>> {
    log::debug!("games::new()");
    let genres = find_genres(&state.pool).await?;
    let publishers = find_publishers(&state.pool).await?;
    render(
        &state.handlebars,
        "game-form",
        &json!({
            "heading": "Nouveau jeu",
            "action": "/games",
            "genres": genres,
            "publishers": publishers,
        }),
    )
}

pub async fn create(
    State(state): State<AppState>,
    Form(game_form): Form<GameForm>,
) -> CatalogResult<Redirect> {
    log::debug!("games::create({:?})", &game_form);
    let game_input = parse_game_form(&game_form)?;
    check_references(&state.pool, &game_input).await?;
    let id = create_game(&state.pool, &game_input).await?;
    log::info!("Created game {} with id {}", game_input.title, id);
    Ok(Redirect::to("/games"))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> CatalogResult<Html<String>> {
    log::debug!("games::edit({})", id);
    let game = find_game_by_id(&state.pool, id)
        .await?
        .ok_or_else(not_found)?;
    let genres = find_genres(&state.pool).await?;
    let publishers = find_publishers(&state.pool).await?;
    render(
        &state.handlebars,
        "game-form",
        &json!({
            "heading": format!("Modifier {}", game.title),
            "action": format!("/games/{}/edit", id),
            "game": game,
            "genres": genres,
            "publishers": publishers,
        }),
    )
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(game_form): Form<GameForm>,
) -> CatalogResult<Redirect> {
    log::debug!("games::update({}, {:?})", id, &game_form);
    let game_input = parse_game_form(&game_form)?;
    check_references(&state.pool, &game_input).await?;
    if update_game(&state.pool, id, &game_input).await? == 0 {
        return Err(not_found());
    }
    log::info!("Updated game with id {}", id);
    Ok(Redirect::to(&format!("/games/{}", id)))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> CatalogResult<Redirect> {
    log::debug!("games::delete({})", id);
    if delete_game_by_id(&state.pool, id).await? == 0 {
        return Err(not_found());
    }
    log::info!("Deleted game with id {}", id);
    Ok(Redirect::to("/games"))
}
