use super::super::model::GameInput;
use super::*;
use chrono::NaiveDate;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test() {
    // given
    let db_file = NamedTempFile::new().unwrap();
    let pool = establish_connection(db_file.path().to_str().unwrap())
        .await
        .unwrap();
    let genre_id = create_genre(&pool, "Puzzle").await.unwrap();
    let publisher_id = create_publisher(&pool, "Nintendo").await.unwrap();
    create_game(
        &pool,
        &GameInput {
            title: String::from("Tetris"),
            description: String::new(),
            release_date: NaiveDate::from_ymd_opt(1989, 6, 14).unwrap(),
            featured: false,
            genre_id,
            publisher_id,
        },
    )
    .await
    .unwrap();

    // when
    let error = delete_genre_by_id(&pool, genre_id).await.unwrap_err();
    let catalog_error = deletion_error(error);

    // then
    assert_eq!(
        catalog_error,
        CatalogError::Conflict(String::from("Genre is still used by games"))
    );
    assert!(find_genre_by_id(&pool, genre_id).await.unwrap().is_some());
}

#[test]
fn test_other_errors_should_be_kept() {
    // given
    let error = sqlx::Error::PoolTimedOut;

    // when
    let catalog_error = deletion_error(error);

    // then
    assert!(matches!(catalog_error, CatalogError::Internal(_)));
}
