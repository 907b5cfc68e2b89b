use super::SimpleResult;
use super::database::*;
use super::model::CanonicalGenre;
use sqlx::sqlite::SqlitePool;
use strum::IntoEnumIterator;

/// Makes sure every canonical genre exists, leaving existing rows untouched.
pub async fn seed_genres(pool: &SqlitePool) -> SimpleResult<u64> {
    let mut transaction = try_with!(begin_transaction(pool).await, "Failed to seed genres");
    let mut created = 0;
    for genre in CanonicalGenre::iter() {
        let name: &'static str = genre.into();
        created += try_with!(
            upsert_genre(&mut *transaction, name).await,
            "Failed to seed genre {}",
            name
        );
    }
    try_with!(
        commit_transaction(transaction).await,
        "Failed to seed genres"
    );
    log::info!("Seeded {} new genre(s)", created);
    Ok(created)
}
