//! HTTP-level integration tests for the product sub-workflow, the catalog,
//! users, and the dashboard summary.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete, get, post_multipart, put_multipart, valid_product_fields,
    valid_project_fields,
};
use sqlx::PgPool;

async fn create_project(app: &axum::Router) -> String {
    let created = body_json(
        post_multipart(app, "/api/v1/projects", &valid_project_fields(), &[]).await,
    )
    .await;
    created["data"]["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Test: product creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_product_under_project(pool: PgPool) {
    let app = build_test_app(pool).app;
    let project_id = create_project(&app).await;

    let response = post_multipart(
        &app,
        &format!("/api/v1/projects/{project_id}/products"),
        &valid_product_fields(),
        &[("informe.pdf", b"PDF bytes")],
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Producto creado con éxito.");
    // Products never score.
    assert!(json.get("scoring").is_none());
    assert_eq!(json["data"]["productType"], "ART_OPEN_A1");
    assert_eq!(json["data"]["projectId"].as_str().unwrap(), project_id);

    // The product appears in the project's listing and detail.
    let listed = body_json(
        get(&app, &format!("/api/v1/projects/{project_id}/products")).await,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let id = json["data"]["id"].as_str().unwrap();
    let detail = body_json(
        get(&app, &format!("/api/v1/projects/{project_id}/products/{id}")).await,
    )
    .await;
    assert_eq!(detail["attachments"].as_array().unwrap().len(), 1);
    assert_eq!(detail["attachments"][0]["relatedType"], "PRODUCT");
}

// ---------------------------------------------------------------------------
// Test: missing parent project (projectId that resolves to nothing)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_product_for_nonexistent_project(pool: PgPool) {
    let app = build_test_app(pool).app;

    let response = post_multipart(
        &app,
        "/api/v1/projects/nonexistent/products",
        &valid_product_fields(),
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].as_str().unwrap().contains("nonexistent"));

    // Nothing was written: no product exists anywhere.
    let listed = body_json(get(&app, "/api/v1/products").await).await;
    assert_eq!(listed.as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Test: product validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_product_field_errors_collected(pool: PgPool) {
    let app = build_test_app(pool).app;
    let project_id = create_project(&app).await;

    let fields = [
        ("titulo", "Ab"),        // minimum is 5
        ("descripcion", "corta"), // minimum is 10
        ("productType", "REVISTA"),
    ];
    let response = post_multipart(
        &app,
        &format!("/api/v1/projects/{project_id}/products"),
        &fields,
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    let errors = json["fields"].as_object().unwrap();
    assert!(errors.contains_key("titulo"));
    assert!(errors.contains_key("descripcion"));
    assert!(errors.contains_key("productType"));

    let listed = body_json(
        get(&app, &format!("/api/v1/projects/{project_id}/products")).await,
    )
    .await;
    assert_eq!(listed.as_array().unwrap().len(), 0);
}

// ---------------------------------------------------------------------------
// Test: update scoping
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_product_success(pool: PgPool) {
    let app = build_test_app(pool).app;
    let project_id = create_project(&app).await;

    let created = body_json(
        post_multipart(
            &app,
            &format!("/api/v1/projects/{project_id}/products"),
            &valid_product_fields(),
            &[],
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap();

    let fields = [
        ("titulo", "Software de análisis"),
        (
            "descripcion",
            "Herramienta de software publicada como producto derivado.",
        ),
        ("productType", "SF"),
        ("isPublic", "true"),
    ];
    let response = put_multipart(
        &app,
        &format!("/api/v1/projects/{project_id}/products/{id}"),
        &fields,
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Producto actualizado con éxito.");
    assert_eq!(json["data"]["productType"], "SF");
    assert_eq!(json["data"]["version"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_product_under_wrong_project_not_found(pool: PgPool) {
    let app = build_test_app(pool).app;
    let project_a = create_project(&app).await;
    let project_b = create_project(&app).await;

    let created = body_json(
        post_multipart(
            &app,
            &format!("/api/v1/projects/{project_a}/products"),
            &valid_product_fields(),
            &[],
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap();

    // The product exists, but not under project B.
    let response = put_multipart(
        &app,
        &format!("/api/v1/projects/{project_b}/products/{id}"),
        &valid_product_fields(),
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // It is still reachable under its real project, unchanged.
    let detail = body_json(
        get(&app, &format!("/api/v1/projects/{project_a}/products/{id}")).await,
    )
    .await;
    assert_eq!(detail["version"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_product(pool: PgPool) {
    let app = build_test_app(pool).app;
    let project_id = create_project(&app).await;
    let created = body_json(
        post_multipart(
            &app,
            &format!("/api/v1/projects/{project_id}/products"),
            &valid_product_fields(),
            &[],
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap();

    let response = delete(
        &app,
        &format!("/api/v1/projects/{project_id}/products/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(&app, &format!("/api/v1/projects/{project_id}/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: catalog, users, dashboard
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_product_type_catalog(pool: PgPool) {
    let app = build_test_app(pool).app;
    let response = get(&app, "/api/v1/product-types").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let catalog = json.as_array().unwrap();
    assert_eq!(catalog.len(), 12);
    assert!(catalog
        .iter()
        .any(|e| e["code"] == "ART_OPEN_A1" && e["label"] == "Artículo A1"));
    assert!(catalog.iter().any(|e| e["label"] == "Tesis Doctoral"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seeded_users_listed(pool: PgPool) {
    let app = build_test_app(pool).app;
    let json = body_json(get(&app, "/api/v1/users").await).await;
    let users = json.as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert!(users.iter().any(|u| u["role"] == "ADMINISTRADOR"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_summary_reflects_mutations(pool: PgPool) {
    let app = build_test_app(pool).app;

    let empty = body_json(get(&app, "/api/v1/dashboard/summary").await).await;
    assert_eq!(empty["data"]["totalProjects"], 0);
    assert!(empty["data"]["averageAiScore"].is_null());

    let project_id = create_project(&app).await;
    post_multipart(
        &app,
        &format!("/api/v1/projects/{project_id}/products"),
        &valid_product_fields(),
        &[],
    )
    .await;

    let json = body_json(get(&app, "/api/v1/dashboard/summary").await).await;
    assert_eq!(json["data"]["totalProjects"], 1);
    assert_eq!(json["data"]["totalProducts"], 1);
    assert!(json["data"]["averageAiScore"].as_f64().is_some());
    let by_estado = json["data"]["byEstado"].as_array().unwrap();
    assert!(by_estado
        .iter()
        .any(|e| e["estado"] == "PROPUESTO" && e["count"] == 1));
}
