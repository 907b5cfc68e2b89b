use super::*;
use reqwest::StatusCode;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test() {
    // given
    let db_file = NamedTempFile::new().unwrap();
    let pool = super::super::database::establish_connection(db_file.path().to_str().unwrap())
        .await
        .unwrap();
    let base_url = spawn_test_server(pool).await;
    let client = test_client();

    // when
    let stylesheet = client
        .get(format!("{}/css/style.css", base_url))
        .send()
        .await
        .unwrap();
    let missing = client
        .get(format!("{}/css/missing.css", base_url))
        .send()
        .await
        .unwrap();
    let invalid_id = client
        .get(format!("{}/games/abc", base_url))
        .send()
        .await
        .unwrap();

    // then
    assert_eq!(stylesheet.status(), StatusCode::OK);
    assert_eq!(stylesheet.headers()["content-type"], "text/css");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(invalid_id.status(), StatusCode::BAD_REQUEST);
}
