use super::SimpleResult;
use super::model::*;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Executor, Sqlite, Transaction};
use std::str::FromStr;

static MIGRATOR: Migrator = sqlx::migrate!();

const GAME_SELECT: &str = "
    SELECT g.id, g.title, g.description, g.release_date, g.featured,
        g.genre_id, ge.name AS genre_name,
        g.publisher_id, p.name AS publisher_name
    FROM games AS g
    JOIN genres AS ge ON g.genre_id = ge.id
    JOIN publishers AS p ON g.publisher_id = p.id
";

pub async fn establish_connection(url: &str) -> SimpleResult<SqlitePool> {
    let options = try_with!(
        SqliteConnectOptions::from_str(url),
        "Invalid database url {}",
        url
    )
    .create_if_missing(true)
    .foreign_keys(true)
    .journal_mode(SqliteJournalMode::Wal)
    .synchronous(SqliteSynchronous::Normal);

    let pool = try_with!(
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .connect_with(options)
            .await,
        "Error connecting to {}",
        url
    );

    try_with!(
        MIGRATOR.run(&pool).await,
        "Failed to run database migrations"
    );

    Ok(pool)
}

pub async fn begin_transaction(pool: &SqlitePool) -> sqlx::Result<Transaction<'static, Sqlite>> {
    pool.begin().await
}

pub async fn commit_transaction(transaction: Transaction<'_, Sqlite>) -> sqlx::Result<()> {
    transaction.commit().await
}

pub async fn close_connection(pool: &SqlitePool) {
    if let Err(error) = pool
        .execute(
            "
            PRAGMA optimize;
            PRAGMA wal_checkpoint(truncate);
            ",
        )
        .await
    {
        log::warn!("Failed to optimize the database: {}", error);
    }
    pool.close().await;
}

pub async fn create_genre<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    name: &str,
) -> sqlx::Result<i64> {
    sqlx::query(
        "
        INSERT INTO genres (name)
        VALUES (?)
        ",
    )
    .bind(name)
    .execute(connection)
    .await
    .map(|result| result.last_insert_rowid())
}

/// Inserts the genre unless one with the same name exists, returns the number of inserted rows.
pub async fn upsert_genre<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    name: &str,
) -> sqlx::Result<u64> {
    sqlx::query(
        "
        INSERT INTO genres (name)
        VALUES (?)
        ON CONFLICT (name) DO NOTHING
        ",
    )
    .bind(name)
    .execute(connection)
    .await
    .map(|result| result.rows_affected())
}

pub async fn find_genres<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
) -> sqlx::Result<Vec<Genre>> {
    sqlx::query_as::<_, Genre>(
        "
        SELECT id, name
        FROM genres
        ORDER BY name, id
        ",
    )
    .fetch_all(connection)
    .await
}

pub async fn find_genre_by_id<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    id: i64,
) -> sqlx::Result<Option<Genre>> {
    sqlx::query_as::<_, Genre>(
        "
        SELECT id, name
        FROM genres
        WHERE id = ?
        ",
    )
    .bind(id)
    .fetch_optional(connection)
    .await
}

pub async fn find_genre_by_name<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    name: &str,
) -> sqlx::Result<Option<Genre>> {
    sqlx::query_as::<_, Genre>(
        "
        SELECT id, name
        FROM genres
        WHERE name = ?
        ",
    )
    .bind(name)
    .fetch_optional(connection)
    .await
}

pub async fn delete_genre_by_id<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    id: i64,
) -> sqlx::Result<u64> {
    sqlx::query(
        "
        DELETE FROM genres
        WHERE id = ?
        ",
    )
    .bind(id)
    .execute(connection)
    .await
    .map(|result| result.rows_affected())
}

pub async fn create_publisher<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    name: &str,
) -> sqlx::Result<i64> {
    sqlx::query(
        "
        INSERT INTO publishers (name)
        VALUES (?)
        ",
    )
    .bind(name)
    .execute(connection)
    .await
    .map(|result| result.last_insert_rowid())
}

pub async fn update_publisher<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    id: i64,
    name: &str,
) -> sqlx::Result<u64> {
    sqlx::query(
        "
        UPDATE publishers
        SET name = ?
        WHERE id = ?
        ",
    )
    .bind(name)
    .bind(id)
    .execute(connection)
    .await
    .map(|result| result.rows_affected())
}

pub async fn find_publishers<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
) -> sqlx::Result<Vec<Publisher>> {
    sqlx::query_as::<_, Publisher>(
        "
        SELECT id, name
        FROM publishers
        ORDER BY name, id
        ",
    )
    .fetch_all(connection)
    .await
}

pub async fn find_publisher_by_id<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    id: i64,
) -> sqlx::Result<Option<Publisher>> {
    sqlx::query_as::<_, Publisher>(
        "
        SELECT id, name
        FROM publishers
        WHERE id = ?
        ",
    )
    .bind(id)
    .fetch_optional(connection)
    .await
}

pub async fn find_publisher_by_name<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    name: &str,
) -> sqlx::Result<Option<Publisher>> {
    sqlx::query_as::<_, Publisher>(
        "
        SELECT id, name
        FROM publishers
        WHERE name = ?
        ",
    )
    .bind(name)
    .fetch_optional(connection)
    .await
}

pub async fn delete_publisher_by_id<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    id: i64,
) -> sqlx::Result<u64> {
    sqlx::query(
        "
        DELETE FROM publishers
        WHERE id = ?
        ",
    )
    .bind(id)
    .execute(connection)
    .await
    .map(|result| result.rows_affected())
}

pub async fn create_game<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    game_input: &GameInput,
) -> sqlx::Result<i64> {
    sqlx::query(
        "
        INSERT INTO games (title, description, release_date, featured, genre_id, publisher_id)
        VALUES (?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(&game_input.title)
    .bind(&game_input.description)
    .bind(game_input.release_date)
    .bind(game_input.featured)
    .bind(game_input.genre_id)
    .bind(game_input.publisher_id)
    .execute(connection)
    .await
    .map(|result| result.last_insert_rowid())
}

pub async fn update_game<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    id: i64,
    game_input: &GameInput,
) -> sqlx::Result<u64> {
    sqlx::query(
        "
        UPDATE games
        SET title = ?, description = ?, release_date = ?, featured = ?, genre_id = ?, publisher_id = ?
        WHERE id = ?
        ",
    )
    .bind(&game_input.title)
    .bind(&game_input.description)
    .bind(game_input.release_date)
    .bind(game_input.featured)
    .bind(game_input.genre_id)
    .bind(game_input.publisher_id)
    .bind(id)
    .execute(connection)
    .await
    .map(|result| result.rows_affected())
}

pub async fn find_games<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
) -> sqlx::Result<Vec<Game>> {
    let sql = format!("{} ORDER BY g.title, g.id", GAME_SELECT);
    sqlx::query_as::<_, Game>(&sql).fetch_all(connection).await
}

pub async fn find_featured_games<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
) -> sqlx::Result<Vec<Game>> {
    let sql = format!(
        "{} WHERE g.featured = 1 ORDER BY g.title, g.id",
        GAME_SELECT
    );
    sqlx::query_as::<_, Game>(&sql).fetch_all(connection).await
}

pub async fn find_games_by_genre_id<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    genre_id: i64,
) -> sqlx::Result<Vec<Game>> {
    let sql = format!(
        "{} WHERE g.genre_id = ? ORDER BY g.title, g.id",
        GAME_SELECT
    );
    sqlx::query_as::<_, Game>(&sql)
        .bind(genre_id)
        .fetch_all(connection)
        .await
}

pub async fn find_games_by_publisher_id<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    publisher_id: i64,
) -> sqlx::Result<Vec<Game>> {
    let sql = format!(
        "{} WHERE g.publisher_id = ? ORDER BY g.title, g.id",
        GAME_SELECT
    );
    sqlx::query_as::<_, Game>(&sql)
        .bind(publisher_id)
        .fetch_all(connection)
        .await
}

pub async fn find_game_by_id<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    id: i64,
) -> sqlx::Result<Option<Game>> {
    let sql = format!("{} WHERE g.id = ?", GAME_SELECT);
    sqlx::query_as::<_, Game>(&sql)
        .bind(id)
        .fetch_optional(connection)
        .await
}

pub async fn count_games_by_genre_id<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    genre_id: i64,
) -> sqlx::Result<i64> {
    sqlx::query_scalar(
        "
        SELECT COUNT(*)
        FROM games
        WHERE genre_id = ?
        ",
    )
    .bind(genre_id)
    .fetch_one(connection)
    .await
}

pub async fn delete_game_by_id<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    id: i64,
) -> sqlx::Result<u64> {
    sqlx::query(
        "
        DELETE FROM games
        WHERE id = ?
        ",
    )
    .bind(id)
    .execute(connection)
    .await
    .map(|result| result.rows_affected())
}

pub async fn delete_games_by_publisher_id<'a, E: Executor<'a, Database = Sqlite>>(
    connection: E,
    publisher_id: i64,
) -> sqlx::Result<u64> {
    sqlx::query(
        "
        DELETE FROM games
        WHERE publisher_id = ?
        ",
    )
    .bind(publisher_id)
    .execute(connection)
    .await
    .map(|result| result.rows_affected())
}
