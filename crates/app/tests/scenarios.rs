//! End-to-end flows through the controllers and session gate against a mock
//! REST server.

use serde_json::json;
use testresult::TestResult;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

use stockroom::{products::ProductId, users::UserId};
use stockroom_app::{
    context::AppContext,
    remote::ApiBase,
    session::{MemorySessionStore, View},
};

fn context(server: &MockServer) -> TestResult<AppContext> {
    let base = ApiBase::parse(&format!("{}/api", server.uri()))?;

    Ok(AppContext::from_api_base(&base))
}

fn lamp(quantity: u64) -> serde_json::Value {
    json!({
        "id": 3,
        "name": "Lamp",
        "description": "Desk lamp",
        "price": "12.5",
        "quantity": quantity,
    })
}

#[tokio::test]
async fn signup_then_login_reaches_dashboard() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/signup"))
        .and(body_json(json!({"username": "alice", "password": "pw"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 7, "username": "alice"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({"username": "alice", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "t1"})))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server)?;
    let mut gate = ctx.session_gate(Box::new(MemorySessionStore::new()));

    assert_eq!(gate.view(), View::Login);
    assert_eq!(gate.navigate(View::Dashboard), View::Login);

    gate.toggle_mode();

    assert_eq!(gate.signup("alice", "pw").await?, View::Login);
    assert_eq!(gate.login("alice", "pw").await?, View::Dashboard);
    assert_eq!(gate.token(), Some("t1"));
    assert_eq!(gate.navigate(View::Products), View::Products);

    Ok(())
}

#[tokio::test]
async fn failed_login_stays_on_login_form() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let ctx = context(&server)?;
    let mut gate = ctx.session_gate(Box::new(MemorySessionStore::new()));

    let result = gate.login("alice", "wrong").await;

    assert!(result.is_err(), "login should be rejected");
    assert_eq!(gate.view(), View::Login);
    assert_eq!(gate.error(), Some("Error: Invalid credentials"));

    Ok(())
}

#[tokio::test]
async fn sell_writes_back_and_refetches() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([lamp(4)])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/products/3"))
        .and(body_json(json!({
            "name": "Lamp",
            "description": "Desk lamp",
            "price": "12.5",
            "quantity": 3,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(lamp(3)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([lamp(3)])))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server)?;
    let mut controller = ctx.products_controller();
    let mut dashboard = controller.subscribe();

    controller.refresh().await?;
    controller.sell(&ProductId::from(3)).await?;

    let products = dashboard.borrow_and_update().clone();
    let sold = products.first().ok_or("product 3 missing after sell")?;

    assert_eq!(sold.quantity, 3);
    assert_eq!(sold.name, "Lamp");
    assert_eq!(sold.description, "Desk lamp");
    assert_eq!(sold.price.display(), "12.50");
    assert_eq!(controller.error(), None);

    Ok(())
}

#[tokio::test]
async fn out_of_stock_sell_sends_nothing() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([lamp(0)])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = context(&server)?;
    let mut controller = ctx.products_controller();

    controller.refresh().await?;

    assert!(
        controller.sell(&ProductId::from(3)).await.is_err(),
        "selling an empty shelf should fail"
    );
    assert_eq!(controller.error(), Some("Product is out of stock"));

    Ok(())
}

#[tokio::test]
async fn user_changes_are_patched_without_refetch() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "username": "alice"},
            {"id": 2, "username": "bob"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(json!({"username": "carol", "password": "pw"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 3, "username": "carol"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server)?;
    let mut controller = ctx.users_controller();

    controller.refresh().await?;

    controller.draft_mut().username = "carol".to_string();
    controller.draft_mut().password = "pw".to_string();
    controller.submit().await?;

    controller.delete(&UserId::from(1)).await?;

    let names: Vec<&str> = controller
        .items()
        .iter()
        .map(|user| user.username.as_str())
        .collect();

    assert_eq!(names, ["bob", "carol"]);

    Ok(())
}

#[tokio::test]
async fn deleting_a_deleted_product_keeps_the_list() -> TestResult {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([lamp(4)])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/products/8"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Product not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let ctx = context(&server)?;
    let mut controller = ctx.products_controller();

    controller.refresh().await?;

    assert!(
        controller.delete(&ProductId::from(8)).await.is_err(),
        "deleting a missing product should fail"
    );
    assert_eq!(controller.items().len(), 1);
    assert_eq!(
        controller.error(),
        Some("Failed to delete product: server responded 404 Not Found: Product not found")
    );

    Ok(())
}
