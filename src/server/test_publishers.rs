use super::super::database::*;
use super::super::model::GameInput;
use super::super::seed::seed_genres;
use super::*;
use chrono::NaiveDate;
use reqwest::StatusCode;
use tempfile::NamedTempFile;

async fn create_test_game(pool: &SqlitePool, title: &str, publisher_id: i64) -> i64 {
    create_game(
        pool,
        &GameInput {
            title: String::from(title),
            description: String::new(),
            release_date: NaiveDate::from_ymd_opt(1991, 6, 23).unwrap(),
            featured: true,
            genre_id: 1,
            publisher_id,
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test() {
    // given
    let db_file = NamedTempFile::new().unwrap();
    let pool = establish_connection(db_file.path().to_str().unwrap())
        .await
        .unwrap();
    let base_url = spawn_test_server(pool.clone()).await;
    let client = test_client();

    // when
    let created = client
        .post(format!("{}/publishers", base_url))
        .form(&[("name", "Sega")])
        .send()
        .await
        .unwrap();
    let duplicate = client
        .post(format!("{}/publishers", base_url))
        .form(&[("name", "Sega")])
        .send()
        .await
        .unwrap();

    // then
    assert_eq!(created.status(), StatusCode::SEE_OTHER);
    assert_eq!(created.headers()["location"], "/publishers");
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.text().await.unwrap(), "Publisher already exists");
    assert_eq!(find_publishers(&pool).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_publisher() {
    // given
    let db_file = NamedTempFile::new().unwrap();
    let pool = establish_connection(db_file.path().to_str().unwrap())
        .await
        .unwrap();
    let sega_id = create_publisher(&pool, "Sega").await.unwrap();
    create_publisher(&pool, "Atari").await.unwrap();
    let base_url = spawn_test_server(pool.clone()).await;
    let client = test_client();

    // when
    let form = client
        .get(format!("{}/publishers/{}/edit", base_url, sega_id))
        .send()
        .await
        .unwrap();
    let renamed = client
        .post(format!("{}/publishers/{}/edit", base_url, sega_id))
        .form(&[("name", "Sega Sammy")])
        .send()
        .await
        .unwrap();
    let taken = client
        .post(format!("{}/publishers/{}/edit", base_url, sega_id))
        .form(&[("name", "Atari")])
        .send()
        .await
        .unwrap();
    let missing = client
        .post(format!("{}/publishers/999/edit", base_url))
        .form(&[("name", "Konami")])
        .send()
        .await
        .unwrap();

    // then
    assert_eq!(form.status(), StatusCode::OK);
    assert!(form.text().await.unwrap().contains(r#"value="Sega""#));
    assert_eq!(renamed.status(), StatusCode::SEE_OTHER);
    assert_eq!(taken.status(), StatusCode::BAD_REQUEST);
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        find_publisher_by_id(&pool, sega_id)
            .await
            .unwrap()
            .map(|publisher| publisher.name),
        Some(String::from("Sega Sammy"))
    );
}

#[tokio::test]
async fn test_delete_publisher_should_delete_games() {
    // given
    let db_file = NamedTempFile::new().unwrap();
    let pool = establish_connection(db_file.path().to_str().unwrap())
        .await
        .unwrap();
    seed_genres(&pool).await.unwrap();
    let nintendo_id = create_publisher(&pool, "Nintendo").await.unwrap();
    let sega_id = create_publisher(&pool, "Sega").await.unwrap();
    create_test_game(&pool, "Mario", nintendo_id).await;
    create_test_game(&pool, "Sonic", sega_id).await;
    create_test_game(&pool, "Streets of Rage", sega_id).await;
    let base_url = spawn_test_server(pool.clone()).await;
    let client = test_client();

    // when
    let listing = client
        .get(format!("{}/publishers/{}", base_url, sega_id))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let response = client
        .post(format!("{}/publishers/{}/delete", base_url, sega_id))
        .send()
        .await
        .unwrap();

    // then
    assert!(listing.contains("Sonic"));
    assert!(listing.contains("Streets of Rage"));
    assert!(!listing.contains("Mario"));
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/publishers");
    let games = find_games(&pool).await.unwrap();
    assert_eq!(games.len(), 1);
    assert!(games.iter().all(|game| game.publisher_id != sega_id));
    assert!(find_publisher_by_id(&pool, sega_id).await.unwrap().is_none());

    let body = client
        .get(format!("{}/games", base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Mario"));
    assert!(!body.contains("Sonic"));
    let missing = client
        .get(format!("{}/publishers/{}", base_url, sega_id))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_publisher_should_be_not_found() {
    // given
    let db_file = NamedTempFile::new().unwrap();
    let pool = establish_connection(db_file.path().to_str().unwrap())
        .await
        .unwrap();
    let base_url = spawn_test_server(pool.clone()).await;
    let client = test_client();

    // when
    let response = client
        .post(format!("{}/publishers/999/delete", base_url))
        .send()
        .await
        .unwrap();

    // then
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "Publisher not found");
}

#[tokio::test]
async fn test_failed_deletion_should_keep_games() {
    // given
    let db_file = NamedTempFile::new().unwrap();
    let pool = establish_connection(db_file.path().to_str().unwrap())
        .await
        .unwrap();
    seed_genres(&pool).await.unwrap();
    let publisher_id = create_publisher(&pool, "Konami").await.unwrap();
    create_test_game(&pool, "Castlevania", publisher_id).await;
    sqlx::query(
        "
        CREATE TRIGGER publishers_locked
        BEFORE DELETE ON publishers
        BEGIN
            SELECT RAISE(ABORT, 'publishers are locked');
        END
        ",
    )
    .execute(&pool)
    .await
    .unwrap();
    let base_url = spawn_test_server(pool.clone()).await;
    let client = test_client();

    // when
    let response = client
        .post(format!("{}/publishers/{}/delete", base_url, publisher_id))
        .send()
        .await
        .unwrap();

    // then
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text().await.unwrap(), "Internal server error");
    assert_eq!(
        find_games_by_publisher_id(&pool, publisher_id)
            .await
            .unwrap()
            .len(),
        1
    );
    assert!(
        find_publisher_by_id(&pool, publisher_id)
            .await
            .unwrap()
            .is_some()
    );
}
