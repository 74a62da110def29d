mod common;

use sqlx::PgPool;

#[sqlx::test]
async fn test_health_endpoint_success(pool: PgPool) {
    let (server, _mailer) = common::make_server(pool);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["mail"]["status"], "ok");
    assert_eq!(json["checks"]["mail"]["message"], "Backend: memory");
}

#[sqlx::test]
async fn test_health_endpoint_structure(pool: PgPool) {
    let (server, _mailer) = common::make_server(pool);

    let json = server.get("/health").await.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"].get("database").is_some());
    assert!(json["checks"].get("mail").is_some());
}
